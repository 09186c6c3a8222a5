//! Fire-and-forget click tracking through the Umami script, when the page
//! has it loaded.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickEvent {
    pub element: String,
    #[serde(rename = "type")]
    pub element_type: String,
    pub timestamp: String,
}

impl ClickEvent {
    pub fn new(element: &str, element_type: &str) -> Self {
        Self {
            element: element.to_string(),
            element_type: element_type.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

pub fn track_click(element: &str, element_type: &str) {
    emit("click", &ClickEvent::new(element, element_type));
}

/// Calls `window.umami.track(name, data)`. Missing script or a throwing call
/// are both ignored.
#[cfg(feature = "hydrate")]
fn emit<T: Serialize>(name: &str, data: &T) {
    use wasm_bindgen::{JsCast, JsValue};

    let Some(window) = web_sys::window() else {
        return;
    };
    let umami = match js_sys::Reflect::get(&window, &JsValue::from_str("umami")) {
        Ok(v) if v.is_object() => v,
        _ => return,
    };
    let Ok(track) = js_sys::Reflect::get(&umami, &JsValue::from_str("track")) else {
        return;
    };
    let Some(track) = track.dyn_ref::<js_sys::Function>() else {
        return;
    };
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let Ok(payload) = data.serialize(&serializer) else {
        return;
    };
    if let Err(e) = track.call2(&umami, &JsValue::from_str(name), &payload) {
        log::debug!("umami.track failed: {e:?}");
    }
}

#[cfg(not(feature = "hydrate"))]
fn emit<T: Serialize>(_name: &str, _data: &T) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_payload() {
        let event = ClickEvent::new("nav-about", "link");
        let json = serde_json::to_value(&event).expect("serializable");
        assert_eq!(json["element"], "nav-about");
        assert_eq!(json["type"], "link");
        assert!(chrono::DateTime::parse_from_rfc3339(
            json["timestamp"].as_str().expect("timestamp is a string")
        )
        .is_ok());
    }

    #[test]
    fn test_tracking_without_browser_is_a_no_op() {
        track_click("hero-scroll-down", "button");
    }
}
