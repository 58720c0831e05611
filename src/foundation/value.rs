use std::fmt;

use crate::{
    foundation::core::{AttributedString, Color, Point, Rect, Rgba8Premul, Size},
    path::object::ObjectRef,
    types::type_info::{TypeKey, TypeRef},
};

/// Dynamically typed value flowing between the expression evaluator, the
/// coercion layer and object fields.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent object or explicit nil.
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    /// Platform-width float.
    Scalar(f64),
    /// Untyped boxed number, as produced by numeric expression literals.
    Number(serde_json::Number),
    String(String),
    AttributedString(AttributedString),
    Bytes(Vec<u8>),
    /// Source color (straight alpha, float channels).
    Color(Color),
    /// Stored color (premultiplied RGBA8).
    PackedColor(Rgba8Premul),
    Point(Point),
    Size(Size),
    Rect(Rect),
    /// A type used as a value.
    Type(TypeRef),
    /// Name of an action/selector.
    Selector(String),
    Object(ObjectRef),
}

impl Value {
    /// Key of the value's runtime type.
    pub fn type_key(&self) -> TypeKey {
        match self {
            Value::Null => TypeKey::NULL,
            Value::Bool(_) => TypeKey::BOOL,
            Value::Int(_) => TypeKey::INT,
            Value::UInt(_) => TypeKey::UINT,
            Value::Float(_) => TypeKey::FLOAT,
            Value::Double(_) => TypeKey::DOUBLE,
            Value::Scalar(_) => TypeKey::SCALAR,
            Value::Number(_) => TypeKey::NUMBER,
            Value::String(_) => TypeKey::STRING,
            Value::AttributedString(_) => TypeKey::ATTRIBUTED_STRING,
            Value::Bytes(_) => TypeKey::BYTES,
            Value::Color(_) => TypeKey::COLOR,
            Value::PackedColor(_) => TypeKey::PACKED_COLOR,
            Value::Point(_) => TypeKey::POINT,
            Value::Size(_) => TypeKey::SIZE,
            Value::Rect(_) => TypeKey::RECT,
            Value::Type(_) => TypeKey::ANY_CLASS,
            Value::Selector(_) => TypeKey::SELECTOR,
            Value::Object(object) => object.type_ref().key().clone(),
        }
    }

    /// Boxed number from an `f64`; non-finite inputs have no boxed form.
    pub fn number(value: f64) -> Option<Value> {
        serde_json::Number::from_f64(value).map(Value::Number)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Exact `Double` or `Scalar` payload.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) | Value::Scalar(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Convert a JSON scalar. Arrays and objects have no `Value` form.
    pub fn from_json(json: serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Bool(b)),
            serde_json::Value::Number(n) => Some(Value::Number(n)),
            serde_json::Value::String(s) => Some(Value::String(s)),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    /// JSON rendering for reports; objects and types render as their description.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => json!(b),
            Value::Int(i) => json!(i),
            Value::UInt(u) => json!(u),
            Value::Float(f) => json!(f),
            Value::Double(d) | Value::Scalar(d) => json!(d),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) | Value::Selector(s) => json!(s),
            Value::AttributedString(s) => json!(s),
            Value::Bytes(b) => json!(b),
            Value::Color(c) => json!(c),
            Value::PackedColor(c) => json!(c),
            Value::Point(p) => json!({ "x": p.x, "y": p.y }),
            Value::Size(s) => json!({ "width": s.width, "height": s.height }),
            Value::Rect(r) => json!({ "x0": r.x0, "y0": r.y0, "x1": r.x1, "y1": r.y1 }),
            Value::Type(_) | Value::Object(_) => json!(self.to_string()),
        }
    }
}

/// Stringification used when a value is coerced into a string property.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Double(x) | Value::Scalar(x) => write!(f, "{x}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) | Value::Selector(s) => f.write_str(s),
            Value::AttributedString(s) => f.write_str(&s.text),
            Value::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Value::Color(c) => write!(f, "rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a),
            Value::PackedColor(c) => write!(f, "#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a),
            Value::Point(p) => write!(f, "({}, {})", p.x, p.y),
            Value::Size(s) => write!(f, "({} x {})", s.width, s.height),
            Value::Rect(r) => write!(f, "({}, {}, {}, {})", r.x0, r.y0, r.width(), r.height()),
            Value::Type(t) => write!(f, "{t}"),
            Value::Object(object) => write!(f, "<{}>", object.type_ref()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
