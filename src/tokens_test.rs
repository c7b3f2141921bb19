#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn sample_image() -> ImageHandle {
    ImageHandle { width: 1, height: 1, src: "data:image/png;base64,AAAA".into() }
}

// =============================================================
// Creation
// =============================================================

#[test]
fn create_starts_at_origin_unselected() {
    let mut layer = TokenLayer::new();
    let id = layer.create(Some(sample_image()), 20.0);
    let token = layer.get(&id).unwrap();
    assert_eq!(token.center(), pt(0.0, 0.0));
    assert_eq!(token.radius, 20.0);
    assert!(!token.selected);
    assert!(token.image.is_some());
}

#[test]
fn create_assigns_unique_ids() {
    let mut layer = TokenLayer::new();
    let a = layer.create(None, 20.0);
    let b = layer.create(None, 20.0);
    assert_ne!(a, b);
    assert_eq!(layer.len(), 2);
}

// =============================================================
// Hit-testing
// =============================================================

#[test]
fn hit_test_inside_radius() {
    let mut layer = TokenLayer::new();
    let id = layer.create(None, 10.0);
    layer.place(&id, pt(50.0, 50.0));
    assert_eq!(layer.hit_test(pt(56.0, 58.0)), Some(id));
    assert_eq!(layer.hit_test(pt(61.0, 50.0)), None);
}

#[test]
fn hit_test_first_in_array_order() {
    let mut layer = TokenLayer::new();
    let first = layer.create(None, 10.0);
    let second = layer.create(None, 30.0);
    layer.place(&first, pt(0.0, 0.0));
    layer.place(&second, pt(5.0, 0.0));
    // Closer to the second token's center, but the first one is earlier.
    assert_eq!(layer.hit_test(pt(4.0, 0.0)), Some(first));
}

// =============================================================
// Mutation
// =============================================================

#[test]
fn move_by_shifts_position() {
    let mut layer = TokenLayer::new();
    let id = layer.create(None, 10.0);
    layer.place(&id, pt(10.0, 10.0));
    assert!(layer.move_by(&id, 5.0, -2.0));
    assert_eq!(layer.get(&id).unwrap().center(), pt(15.0, 8.0));
}

#[test]
fn unknown_id_mutations_return_false() {
    let mut layer = TokenLayer::new();
    let ghost = Uuid::new_v4();
    assert!(!layer.place(&ghost, pt(1.0, 1.0)));
    assert!(!layer.move_by(&ghost, 1.0, 1.0));
    assert!(!layer.attach_image(&ghost, sample_image()));
    assert!(layer.remove(&ghost).is_none());
}

#[test]
fn set_selected_toggles() {
    let mut layer = TokenLayer::new();
    let id = layer.create(None, 10.0);
    layer.set_selected(&id, true);
    assert!(layer.get(&id).unwrap().selected);
    layer.set_selected(&id, false);
    assert!(!layer.get(&id).unwrap().selected);
}

#[test]
fn attach_image_and_remove() {
    let mut layer = TokenLayer::new();
    let id = layer.create(None, 10.0);
    assert!(layer.attach_image(&id, sample_image()));
    assert!(layer.get(&id).unwrap().image.is_some());
    let removed = layer.remove(&id).unwrap();
    assert_eq!(removed.id, id);
    assert!(layer.is_empty());
}

// =============================================================
// Serde
// =============================================================

#[test]
fn token_serializes_only_persisted_fields() {
    let mut layer = TokenLayer::new();
    let id = layer.create(Some(sample_image()), 20.0);
    layer.place(&id, pt(25.0, 35.0));
    layer.set_selected(&id, true);
    let value = serde_json::to_value(layer.get(&id).unwrap()).unwrap();
    assert_eq!(value, json!({"id": id, "x": 25.0, "y": 35.0, "radius": 20.0}));
}

#[test]
fn token_deserializes_with_defaults() {
    let id = Uuid::new_v4();
    let token: Token = serde_json::from_value(json!({"id": id})).unwrap();
    assert_eq!(token.center(), pt(0.0, 0.0));
    assert_eq!(token.radius, TOKEN_RADIUS);
    assert!(token.image.is_none());
    assert!(!token.selected);
}
