//! Structural validation of decoded responses.
//!
//! Every record is checked against its set of required fields with the
//! expected JSON type. Fields outside that set are copied untouched into the
//! record's `extra` map.

use {
    model::{ErrorResponse, Order, OrderItem},
    serde_json::{Map, Value},
    std::fmt::{self, Display, Formatter},
};

const ORDER_FIELDS: [&str; 6] = [
    "hash",
    "storeNo",
    "customerId",
    "entryTime",
    "billStatus",
    "items",
];

const ITEM_FIELDS: [&str; 7] = [
    "orderTime",
    "menuId",
    "unitPrice",
    "taxRate",
    "orderQty",
    "offerQty",
    "categoryId",
];

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{path}: expected {expected}, found {found}")]
pub struct SchemaError {
    /// Location of the offending value, e.g. `$[0].items[1].orderQty`.
    pub path: String,
    pub expected: &'static str,
    pub found: String,
}

/// Location of a value inside a response, rendered JSONPath style.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Path(String);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}.{key}", self.0))
    }

    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Parses a success response: an array of orders.
pub fn parse_orders(response: &Value) -> Result<Vec<Order>, SchemaError> {
    let root = Path::root();
    let Value::Array(orders) = response else {
        return Err(mismatch(&root, "array of orders", Some(response)));
    };
    orders
        .iter()
        .enumerate()
        .map(|(index, order)| parse_order(order, &root.index(index)))
        .collect()
}

pub fn parse_order(value: &Value, path: &Path) -> Result<Order, SchemaError> {
    let object = Object::new(value, path)?;
    let mut order = Order::new(
        object.string("hash")?,
        object.string("storeNo")?,
        object.string("customerId")?,
        object.string("entryTime")?,
        object.integer("billStatus")?,
    );
    order.items = object
        .array_or_empty("items")?
        .iter()
        .enumerate()
        .map(|(index, item)| parse_item(item, &path.key("items").index(index)))
        .collect::<Result<_, _>>()?;
    order.extra = object.extra(&ORDER_FIELDS);
    Ok(order)
}

pub fn parse_item(value: &Value, path: &Path) -> Result<OrderItem, SchemaError> {
    let object = Object::new(value, path)?;
    Ok(OrderItem {
        order_time: object.string("orderTime")?,
        menu_id: object.string("menuId")?,
        unit_price: object.integer("unitPrice")?,
        tax_rate: object.integer("taxRate")?,
        order_qty: object.integer("orderQty")?,
        offer_qty: object.integer("offerQty")?,
        category_id: object.optional_string("categoryId")?,
        extra: object.extra(&ITEM_FIELDS),
    })
}

/// Parses an error response: a single object, never an array.
pub fn parse_error_response(value: &Value) -> Result<ErrorResponse, SchemaError> {
    let root = Path::root();
    let object = Object::new(value, &root)?;
    Ok(ErrorResponse {
        error_code: object.string(ErrorResponse::ERROR_CODE_KEY)?,
        message: object.string("message")?,
        details: object.optional_object("details")?,
    })
}

/// A JSON object being read field by field.
struct Object<'a> {
    fields: &'a Map<String, Value>,
    path: &'a Path,
}

impl<'a> Object<'a> {
    fn new(value: &'a Value, path: &'a Path) -> Result<Self, SchemaError> {
        match value {
            Value::Object(fields) => Ok(Self { fields, path }),
            other => Err(mismatch(path, "object", Some(other))),
        }
    }

    fn string(&self, key: &str) -> Result<String, SchemaError> {
        match self.fields.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            other => Err(mismatch(&self.path.key(key), "string", other)),
        }
    }

    /// A string that may be missing or `null`.
    fn optional_string(&self, key: &str) -> Result<Option<String>, SchemaError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            other => Err(mismatch(&self.path.key(key), "string or null", other)),
        }
    }

    /// An integer. Floats without a fractional part (`2.0`) are accepted and
    /// coerced; anything else is rejected.
    fn integer(&self, key: &str) -> Result<i64, SchemaError> {
        let value = self.fields.get(key);
        let coerced = match value {
            Some(Value::Number(number)) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|float| {
                        float.fract() == 0.0
                            && *float >= i64::MIN as f64
                            && *float < i64::MAX as f64
                    })
                    .map(|float| float as i64)
            }),
            _ => None,
        };
        coerced.ok_or_else(|| mismatch(&self.path.key(key), "integer", value))
    }

    /// An array that may be missing or `null`, both of which read as empty.
    fn array_or_empty(&self, key: &str) -> Result<&'a [Value], SchemaError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(values)) => Ok(values.as_slice()),
            other => Err(mismatch(&self.path.key(key), "array or null", other)),
        }
    }

    fn optional_object(&self, key: &str) -> Result<Option<Map<String, Value>>, SchemaError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(fields)) => Ok(Some(fields.clone())),
            other => Err(mismatch(&self.path.key(key), "object or null", other)),
        }
    }

    /// All fields not in `known`.
    fn extra(&self, known: &[&str]) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(key, _)| !known.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

fn mismatch(path: &Path, expected: &'static str, found: Option<&Value>) -> SchemaError {
    SchemaError {
        path: path.to_string(),
        expected,
        found: describe(found),
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "missing field".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => format!("boolean {b}"),
        Some(Value::Number(n)) => format!("number {n}"),
        Some(Value::String(s)) => format!("string {s:?}"),
        Some(Value::Array(values)) => format!("array of length {}", values.len()),
        Some(Value::Object(_)) => "object".to_string(),
    }
}
