//! Small view hierarchy shared by the unit tests.
//!
//! `View` (Layoutable) <- `Label`, `View` <- `Button` (Tappable), and a
//! standalone `Layer` reachable through `View.layer` and `Layer.mask`.

use std::sync::{Arc, LazyLock};

use crate::{
    foundation::core::{Rect, Rgba8Premul},
    foundation::value::Value,
    path::fields::FieldTable,
    path::object::{FieldError, ObjectRef, Reflect},
    types::registry::TypeRegistry,
    types::type_info::{CapabilityKey, TypeKey, TypeRef},
};

pub(crate) struct Fixture {
    pub(crate) types: Arc<TypeRegistry>,
    pub(crate) view: TypeRef,
    pub(crate) label: TypeRef,
    pub(crate) button: TypeRef,
    pub(crate) layer: TypeRef,
}

static FIXTURE: LazyLock<Fixture> = LazyLock::new(|| {
    let mut types = TypeRegistry::new();
    types
        .register_capability(CapabilityKey::new("Layoutable"))
        .unwrap();
    types
        .register_capability(CapabilityKey::new("Tappable"))
        .unwrap();
    let view = types
        .register_type(
            TypeKey::new("View"),
            None,
            [CapabilityKey::new("Layoutable")],
        )
        .unwrap();
    let label = types
        .register_type(TypeKey::new("Label"), Some("View"), [])
        .unwrap();
    let button = types
        .register_type(
            TypeKey::new("Button"),
            Some("View"),
            [CapabilityKey::new("Tappable")],
        )
        .unwrap();
    let layer = types
        .register_type(TypeKey::new("Layer"), None, [])
        .unwrap();
    Fixture {
        types: Arc::new(types),
        view,
        label,
        button,
        layer,
    }
});

pub(crate) fn fixture() -> &'static Fixture {
    &FIXTURE
}

fn store_object(slot: &mut Option<ObjectRef>, value: Value) -> Result<(), Value> {
    match value {
        Value::Object(object) => {
            *slot = Some(object);
            Ok(())
        }
        Value::Null => {
            *slot = None;
            Ok(())
        }
        other => Err(other),
    }
}

fn load_object(slot: &Option<ObjectRef>) -> Value {
    slot.clone().map_or(Value::Null, Value::Object)
}

#[derive(Default)]
pub(crate) struct Layer {
    pub(crate) corner_radius: f64,
    pub(crate) opacity: f32,
    pub(crate) mask: Option<ObjectRef>,
}

static LAYER_FIELDS: LazyLock<FieldTable<Layer>> = LazyLock::new(|| {
    FieldTable::<Layer>::new()
        .field(
            "cornerRadius",
            |l| Value::Scalar(l.corner_radius),
            |l, v| match v {
                Value::Scalar(r) => {
                    l.corner_radius = r;
                    Ok(())
                }
                other => Err(other),
            },
        )
        .field(
            "opacity",
            |l| Value::Float(l.opacity),
            |l, v| match v {
                Value::Float(o) => {
                    l.opacity = o;
                    Ok(())
                }
                other => Err(other),
            },
        )
        .field(
            "mask",
            |l| load_object(&l.mask),
            |l, v| store_object(&mut l.mask, v),
        )
});

impl Reflect for Layer {
    fn type_ref(&self) -> TypeRef {
        fixture().layer.clone()
    }

    fn get(&self, name: &str) -> Option<Value> {
        LAYER_FIELDS.get(self, name)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        LAYER_FIELDS.set(self, name, value)
    }
}

pub(crate) struct View {
    pub(crate) alpha: f64,
    pub(crate) hidden: bool,
    pub(crate) tag: i64,
    pub(crate) frame: Rect,
    pub(crate) background: Rgba8Premul,
    pub(crate) layer: Option<ObjectRef>,
}

impl Default for View {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            hidden: false,
            tag: 0,
            frame: Rect::ZERO,
            background: Rgba8Premul::transparent(),
            layer: Some(ObjectRef::new(Layer::default())),
        }
    }
}

static VIEW_FIELDS: LazyLock<FieldTable<View>> = LazyLock::new(|| {
    FieldTable::<View>::new()
        .field(
            "alpha",
            |v| Value::Double(v.alpha),
            |v, x| match x {
                Value::Double(a) => {
                    v.alpha = a;
                    Ok(())
                }
                other => Err(other),
            },
        )
        .field(
            "hidden",
            |v| Value::Bool(v.hidden),
            |v, x| match x {
                Value::Bool(h) => {
                    v.hidden = h;
                    Ok(())
                }
                other => Err(other),
            },
        )
        .alias("isHidden", "hidden")
        .field(
            "tag",
            |v| Value::Int(v.tag),
            |v, x| match x {
                Value::Int(t) => {
                    v.tag = t;
                    Ok(())
                }
                other => Err(other),
            },
        )
        .field(
            "frame",
            |v| Value::Rect(v.frame),
            |v, x| match x {
                Value::Rect(r) => {
                    v.frame = r;
                    Ok(())
                }
                other => Err(other),
            },
        )
        .read_only("bounds", |v| {
            Value::Rect(Rect::from_origin_size((0.0, 0.0), v.frame.size()))
        })
        .field(
            "backgroundColor",
            |v| Value::PackedColor(v.background),
            |v, x| match x {
                Value::PackedColor(c) => {
                    v.background = c;
                    Ok(())
                }
                other => Err(other),
            },
        )
        .field(
            "layer",
            |v| load_object(&v.layer),
            |v, x| store_object(&mut v.layer, x),
        )
});

impl Reflect for View {
    fn type_ref(&self) -> TypeRef {
        fixture().view.clone()
    }

    fn get(&self, name: &str) -> Option<Value> {
        VIEW_FIELDS.get(self, name)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        VIEW_FIELDS.set(self, name, value)
    }
}

#[derive(Default)]
pub(crate) struct Label {
    pub(crate) base: View,
    pub(crate) text: String,
    pub(crate) alignment: i64,
}

static LABEL_FIELDS: LazyLock<FieldTable<Label>> = LazyLock::new(|| {
    FieldTable::<Label>::new()
        .field(
            "text",
            |l| Value::String(l.text.clone()),
            |l, x| match x {
                Value::String(s) => {
                    l.text = s;
                    Ok(())
                }
                other => Err(other),
            },
        )
        .field(
            "textAlignment",
            |l| Value::Int(l.alignment),
            |l, x| match x {
                Value::Int(a) => {
                    l.alignment = a;
                    Ok(())
                }
                Value::Number(n) => match n.as_i64() {
                    Some(a) => {
                        l.alignment = a;
                        Ok(())
                    }
                    None => Err(Value::Number(n)),
                },
                other => Err(other),
            },
        )
});

impl Reflect for Label {
    fn type_ref(&self) -> TypeRef {
        fixture().label.clone()
    }

    fn get(&self, name: &str) -> Option<Value> {
        LABEL_FIELDS
            .get(self, name)
            .or_else(|| VIEW_FIELDS.get(&self.base, name))
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        if LABEL_FIELDS.contains(name) {
            LABEL_FIELDS.set(self, name, value)
        } else {
            VIEW_FIELDS.set(&mut self.base, name, value)
        }
    }
}

#[derive(Default)]
pub(crate) struct Button {
    pub(crate) base: View,
}

impl Reflect for Button {
    fn type_ref(&self) -> TypeRef {
        fixture().button.clone()
    }

    fn get(&self, name: &str) -> Option<Value> {
        VIEW_FIELDS.get(&self.base, name)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        VIEW_FIELDS.set(&mut self.base, name, value)
    }
}
