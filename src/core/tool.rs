use serde_json::{json, Map, Value};

/// Parameter kinds a diagnostics tool may declare. Every parameter is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    StringArray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
}

/// Static metadata for a tool: name, human title, description and parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamDescriptor],
}

impl ToolDescriptor {
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for p in self.params {
            let schema = match p.kind {
                ParamKind::String => json!({ "type": "string", "description": p.description }),
                ParamKind::StringArray => json!({
                    "type": "array",
                    "items": { "type": "string" },
                    "description": p.description,
                }),
            };
            properties.insert(p.name.to_string(), schema);
        }
        json!({ "type": "object", "properties": properties })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ECHO: ToolDescriptor = ToolDescriptor {
        name: "test.echo",
        title: "Echo",
        description: "echo tool",
        params: &[
            ParamDescriptor {
                name: "word",
                kind: ParamKind::String,
                description: "word to echo",
            },
            ParamDescriptor {
                name: "flags",
                kind: ParamKind::StringArray,
                description: "extra flags",
            },
        ],
    };

    #[test]
    fn schema_lists_params_without_required() {
        let schema = ECHO.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["word"]["type"], "string");
        assert_eq!(schema["properties"]["flags"]["items"]["type"], "string");
        assert!(schema.get("required").is_none());
    }
}
