use quick_xml::SeError;
use quick_xml::se::Serializer as XmlSerializer;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT_SIZE: usize = 4;

/// A `<sim_params>` block: one `<key>value</key>` child per parameter.
///
/// Entries keep document order in both directions, which a plain map
/// would not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ParameterBlock(pub Vec<(String, String)>);

impl Serialize for ParameterBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
    }
}

impl<'de> Deserialize<'de> for ParameterBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BlockVisitor;

        impl<'de> Visitor<'de> for BlockVisitor {
            type Value = ParameterBlock;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("parameter elements of the form <key>value</key>")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    if key.starts_with('@') {
                        return Err(de::Error::custom(format!(
                            "unexpected attribute '{}' on a parameter block",
                            &key[1..]
                        )));
                    }
                    entries.push((key, value));
                }
                Ok(ParameterBlock(entries))
            }
        }

        deserializer.deserialize_map(BlockVisitor)
    }
}

/// Serializes `value` as an indented document with an XML declaration and
/// `root` as the top-level element.
pub(crate) fn to_xml_string<T: Serialize>(root: &str, value: &T) -> Result<String, SeError> {
    let mut buffer = String::with_capacity(1024);
    buffer.push_str(DECLARATION);
    buffer.push('\n');

    let mut serializer = XmlSerializer::with_root(&mut buffer, Some(root))?;
    serializer.indent(' ', INDENT_SIZE);
    value.serialize(serializer)?;

    buffer.push('\n');
    Ok(buffer)
}
