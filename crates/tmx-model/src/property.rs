//! Custom properties.

use tmx_common::Colour;

use crate::PropertyType;

/// The value of a property. The variant is the property's type tag, so a
/// value can never carry stale data from a previous type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "lowercase"))]
pub enum PropertyValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    #[cfg_attr(feature = "serde", serde(rename = "color"))]
    Colour(Colour),
    File(String),
}

impl PropertyValue {
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::String(_) => PropertyType::String,
            Self::Int(_) => PropertyType::Int,
            Self::Float(_) => PropertyType::Float,
            Self::Bool(_) => PropertyType::Bool,
            Self::Colour(_) => PropertyType::Colour,
            Self::File(_) => PropertyType::File,
        }
    }
}

impl Default for PropertyValue {
    fn default() -> Self {
        Self::String(String::new())
    }
}

/// A named, typed value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    name: String,
    value: PropertyValue,
}

impl Property {
    /// New property holding an empty string.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_value(name, PropertyValue::default())
    }

    pub fn with_value(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    pub fn property_type(&self) -> PropertyType {
        self.value.property_type()
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&str> {
        match &self.value {
            PropertyValue::File(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            PropertyValue::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.value {
            PropertyValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            PropertyValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_colour(&self) -> Option<Colour> {
        match self.value {
            PropertyValue::Colour(v) => Some(v),
            _ => None,
        }
    }

    /// Replace the value (and with it the type).
    pub fn set(&mut self, value: PropertyValue) -> &mut Self {
        self.value = value;
        self
    }

    pub fn set_string(&mut self, value: impl Into<String>) -> &mut Self {
        self.set(PropertyValue::String(value.into()))
    }

    pub fn set_file(&mut self, value: impl Into<String>) -> &mut Self {
        self.set(PropertyValue::File(value.into()))
    }

    pub fn set_int(&mut self, value: i64) -> &mut Self {
        self.set(PropertyValue::Int(value))
    }

    pub fn set_float(&mut self, value: f64) -> &mut Self {
        self.set(PropertyValue::Float(value))
    }

    pub fn set_bool(&mut self, value: bool) -> &mut Self {
        self.set(PropertyValue::Bool(value))
    }

    pub fn set_colour(&mut self, value: Colour) -> &mut Self {
        self.set(PropertyValue::Colour(value))
    }
}

/// Properties of one owner, keyed by name, in first-insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Properties {
    entries: Vec<Property>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property. An existing property with the same name is
    /// replaced in place.
    pub fn set(&mut self, property: Property) {
        match self.entries.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.entries.push(property),
        }
    }

    /// Insert several properties; later entries win over earlier ones.
    pub fn update(&mut self, properties: impl IntoIterator<Item = Property>) {
        for property in properties {
            self.set(property);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.entries.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.entries.iter_mut().find(|p| p.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Property> {
        let index = self.entries.iter().position(|p| p.name == name)?;
        Some(self.entries.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Property> for Properties {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut properties = Self::new();
        properties.update(iter);
        properties
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setter_retags() {
        let mut prop = Property::new("speed");
        assert_eq!(prop.property_type(), PropertyType::String);
        assert_eq!(prop.as_str(), Some(""));

        prop.set_int(4);
        assert_eq!(prop.property_type(), PropertyType::Int);
        assert_eq!(prop.as_int(), Some(4));
        assert_eq!(prop.as_str(), None);

        prop.set_colour(Colour::rgb(1, 2, 3)).set_bool(true);
        assert_eq!(prop.as_bool(), Some(true));
        assert_eq!(prop.as_colour(), None);
        assert_eq!(prop.as_int(), None);
    }

    #[test]
    fn test_file_and_string_are_distinct() {
        let mut prop = Property::new("sprite");
        prop.set_file("hero.png");
        assert_eq!(prop.as_file(), Some("hero.png"));
        assert_eq!(prop.as_str(), None);
        assert_eq!(prop.property_type(), PropertyType::File);
    }

    #[test]
    fn test_last_write_wins() {
        let mut props = Properties::new();
        props.set(Property::with_value("a", PropertyValue::Int(1)));
        props.set(Property::with_value("b", PropertyValue::Bool(false)));
        props.set(Property::with_value("a", PropertyValue::Float(2.5)));

        assert_eq!(props.len(), 2);
        assert_eq!(props.get("a").and_then(Property::as_float), Some(2.5));
        let names: Vec<_> = props.iter().map(Property::name).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_remove() {
        let mut props: Properties = [Property::new("x"), Property::new("y")].into_iter().collect();
        assert!(props.remove("x").is_some());
        assert!(props.remove("x").is_none());
        assert_eq!(props.len(), 1);
        assert!(props.get_mut("y").is_some());
    }
}
