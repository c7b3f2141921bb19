//! Token layer: circular image markers positioned in world space.
//!
//! Tokens are independent of the shape store. They share only the camera and
//! the grid. A token is created at the origin, placed once by the next canvas
//! click, and afterwards only moves while move mode drags it.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::TOKEN_RADIUS;
use crate::image_handle::ImageHandle;
use crate::map_file::null_as_default;

/// Unique identifier for a token.
pub type TokenId = Uuid;

fn default_radius() -> f64 {
    TOKEN_RADIUS
}

fn deserialize_radius<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(TOKEN_RADIUS))
}

/// Accept a UUID string, any other string, or a number as a token id.
///
/// Maps written by the browser editor carry millisecond timestamps as ids.
/// Non-UUID ids map to a name-based UUID so the same file always loads to the
/// same ids. A missing or null id gets a fresh one.
fn deserialize_token_id<'de, D>(deserializer: D) -> Result<TokenId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(text) => {
            Ok(Uuid::parse_str(&text).unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, text.as_bytes())))
        }
        serde_json::Value::Number(number) => Ok(Uuid::new_v5(&Uuid::NAMESPACE_OID, number.to_string().as_bytes())),
        serde_json::Value::Null => Ok(Uuid::new_v4()),
        other => Err(D::Error::custom(format!("expected string or number token id, got {other}"))),
    }
}

/// A circular, image-bearing marker.
///
/// Only `id`, `x`, `y` and `radius` are persisted; the image is re-resolved by
/// the host after load and `selected` is transient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default = "Uuid::new_v4", deserialize_with = "deserialize_token_id")]
    pub id: TokenId,
    #[serde(skip)]
    pub image: Option<ImageHandle>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub y: f64,
    #[serde(default = "default_radius", deserialize_with = "deserialize_radius")]
    pub radius: f64,
    #[serde(skip)]
    pub selected: bool,
}

impl Token {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether `p` lies on the token's disc.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.distance(self.center()) <= self.radius
    }
}

/// Ordered token collection. Array order is hit-test order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenLayer {
    tokens: Vec<Token>,
}

impl TokenLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a token at `(0, 0)`, unselected.
    pub fn create(&mut self, image: Option<ImageHandle>, radius: f64) -> TokenId {
        let id = Uuid::new_v4();
        self.tokens.push(Token { id, image, x: 0.0, y: 0.0, radius, selected: false });
        id
    }

    #[must_use]
    pub fn get(&self, id: &TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == *id)
    }

    pub fn get_mut(&mut self, id: &TokenId) -> Option<&mut Token> {
        self.tokens.iter_mut().find(|t| t.id == *id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// First token, in array order, whose disc contains `p`.
    #[must_use]
    pub fn hit_test(&self, p: Point) -> Option<TokenId> {
        self.tokens.iter().find(|t| t.contains(p)).map(|t| t.id)
    }

    /// Set a token's position. Returns false if the token does not exist.
    pub fn place(&mut self, id: &TokenId, at: Point) -> bool {
        let Some(token) = self.get_mut(id) else {
            return false;
        };
        token.x = at.x;
        token.y = at.y;
        true
    }

    /// Shift a token by a world-space delta. Returns false if the token does not exist.
    pub fn move_by(&mut self, id: &TokenId, dx: f64, dy: f64) -> bool {
        let Some(token) = self.get_mut(id) else {
            return false;
        };
        token.x += dx;
        token.y += dy;
        true
    }

    pub fn set_selected(&mut self, id: &TokenId, selected: bool) {
        if let Some(token) = self.get_mut(id) {
            token.selected = selected;
        }
    }

    /// Attach a decoded image to a token that was loaded without one.
    pub fn attach_image(&mut self, id: &TokenId, image: ImageHandle) -> bool {
        let Some(token) = self.get_mut(id) else {
            return false;
        };
        token.image = Some(image);
        true
    }

    /// Remove a token by id, returning it if it was present.
    pub fn remove(&mut self, id: &TokenId) -> Option<Token> {
        let index = self.tokens.iter().position(|t| t.id == *id)?;
        Some(self.tokens.remove(index))
    }

    /// Replace all tokens with a loaded set.
    pub fn replace_all(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
    }
}
