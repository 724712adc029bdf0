//! JSON records shaped like the backend's responses.

use serde_json::{Value, json};

/// A product listing.
#[must_use]
pub fn product(id: &str, name: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Original cartridge, tested and working",
        "price": price,
        "platform": ["NES"],
        "genre": ["Action"],
        "developer": "Capcom",
        "publisher": "Capcom",
        "releaseYear": 1987,
        "condition": "good",
        "images": [],
        "stock": 3,
        "featured": false,
        "tags": ["classic"],
        "console": "NES",
        "region": "NTSC-U",
        "isOriginal": true,
        "createdAt": "2024-01-15T10:30:00Z",
        "updatedAt": "2024-01-15T10:30:00Z"
    })
}

/// A page of records.
#[must_use]
pub fn page(data: Vec<Value>, page: u32, limit: u32, total: u64) -> Value {
    let total_pages = total.div_ceil(u64::from(limit.max(1)));
    json!({
        "data": data,
        "total": total,
        "page": page,
        "limit": limit,
        "totalPages": total_pages
    })
}

/// A user profile.
#[must_use]
pub fn user(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "username": "player1",
        "phone": null,
        "cpf": "12345678901",
        "createdAt": "2024-01-15T10:30:00Z",
        "updatedAt": "2024-01-15T10:30:00Z"
    })
}

/// A cart line for `product`.
#[must_use]
pub fn cart_item(id: &str, product: &Value, quantity: u32, price: f64) -> Value {
    json!({
        "id": id,
        "productId": product["id"],
        "product": product,
        "quantity": quantity,
        "price": price,
        "createdAt": "2024-01-15T10:30:00Z"
    })
}

/// A cart holding `items`.
#[must_use]
pub fn cart(user_id: &str, items: Vec<Value>, total: f64) -> Value {
    let item_count: u64 = items
        .iter()
        .filter_map(|item| item["quantity"].as_u64())
        .sum();
    json!({
        "id": "cart-1",
        "userId": user_id,
        "items": items,
        "total": total,
        "itemCount": item_count,
        "createdAt": "2024-01-15T10:30:00Z",
        "updatedAt": "2024-01-15T10:30:00Z"
    })
}
