//! JSON output formatting

use serde::Serialize;

use crate::error::Result;

/// Render data as pretty-printed JSON for scripting
pub fn render<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_pretty_json() {
        let out = render(&json!({"result": "Survived"})).unwrap();
        assert!(out.contains("\"result\": \"Survived\""));
    }
}
