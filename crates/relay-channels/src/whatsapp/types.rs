use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `object` value carried by WhatsApp Business notifications
pub const WHATSAPP_OBJECT: &str = "whatsapp_business_account";

/// WhatsApp Business API send response
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub messages: Vec<MessageInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Contact {
    pub wa_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageInfo {
    pub id: String,
}

/// Media object lookup response
#[derive(Debug, Deserialize)]
pub(crate) struct MediaResponse {
    pub url: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Outbound text message request body
#[derive(Debug, Serialize)]
pub(crate) struct SendTextRequest<'a> {
    pub messaging_product: &'static str,
    pub to: &'a str,
    #[serde(rename = "type")]
    pub message_type: &'static str,
    pub text: TextBody<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextBody<'a> {
    pub body: &'a str,
}

/// Location of the one message a delivery is answered for
const FIRST_MESSAGE: &str = "/entry/0/changes/0/value/messages/0";

/// Message as it appears inside a webhook notification
#[derive(Debug, Deserialize)]
struct WebhookMessage {
    from: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "type")]
    message_type: Option<String>,
    #[serde(default)]
    text: Option<TextContent>,
    #[serde(default)]
    image: Option<MediaContent>,
}

#[derive(Debug, Deserialize)]
struct TextContent {
    body: String,
}

#[derive(Debug, Deserialize)]
struct MediaContent {
    id: String,
    #[serde(default)]
    caption: Option<String>,
}

/// Type-specific body of an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// Plain text message
    Text {
        /// Message text
        body: String,
    },
    /// Image message, carried by reference
    Image {
        /// Media reference id for [`crate::OutboundApi::resolve_media_url`]
        media_id: String,
        /// Optional caption typed by the sender
        caption: Option<String>,
    },
    /// Anything else (location, audio, sticker, ...)
    Other {
        /// Declared type, `unknown` when absent
        message_type: String,
    },
}

impl MessageKind {
    /// Declared WhatsApp message type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Other { message_type } => message_type,
        }
    }
}

/// First message of a notification, decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Sender WhatsApp id
    pub from: String,
    /// Platform message id
    pub id: Option<String>,
    /// Type-specific body
    pub kind: MessageKind,
}

impl InboundMessage {
    fn from_webhook(msg: WebhookMessage) -> Result<Self> {
        let kind = match msg.message_type.as_deref().unwrap_or("unknown") {
            "text" => {
                let text = msg
                    .text
                    .ok_or_else(|| Error::Decode("text message without text body".to_string()))?;
                MessageKind::Text { body: text.body }
            }
            "image" => {
                let image = msg
                    .image
                    .ok_or_else(|| Error::Decode("image message without image body".to_string()))?;
                MessageKind::Image {
                    media_id: image.id,
                    caption: image.caption,
                }
            }
            other => MessageKind::Other {
                message_type: other.to_string(),
            },
        };

        Ok(Self {
            from: msg.from,
            id: msg.id,
            kind,
        })
    }
}

/// Result of decoding a webhook delivery body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A message to process
    Message(InboundMessage),
    /// Expected object kind, but nothing to process (status callbacks, empty arrays)
    Empty,
    /// `object` missing or not a WhatsApp Business notification
    UnexpectedObject(Option<String>),
}

impl Notification {
    /// Decode a raw webhook body
    ///
    /// Only the first message of the first change of the first entry is
    /// looked at; siblings and later entries are never inspected. Bodies that
    /// are not JSON, or a first message that lacks its sender or the body its
    /// declared type requires, are decode errors.
    pub fn decode(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|e| Error::Decode(e.to_string()))?;

        let object = value.get("object").and_then(Value::as_str);
        if object != Some(WHATSAPP_OBJECT) {
            return Ok(Self::UnexpectedObject(object.map(str::to_string)));
        }

        match value.pointer(FIRST_MESSAGE) {
            Some(msg) => {
                let msg = WebhookMessage::deserialize(msg).map_err(|e| Error::Decode(e.to_string()))?;
                Ok(Self::Message(InboundMessage::from_webhook(msg)?))
            }
            None => Ok(Self::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(message: serde_json::Value) -> Vec<u8> {
        json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "WABA_ID",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": { "display_phone_number": "15550001111", "phone_number_id": "123" },
                        "contacts": [{ "profile": { "name": "Ana" }, "wa_id": "15551234567" }],
                        "messages": [message]
                    }
                }]
            }]
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn test_decode_text() {
        let body = payload(json!({
            "from": "15551234567",
            "id": "wamid.1",
            "timestamp": "1700000000",
            "type": "text",
            "text": { "body": "Hello" }
        }));

        let decoded = Notification::decode(&body).unwrap();
        assert_eq!(
            decoded,
            Notification::Message(InboundMessage {
                from: "15551234567".to_string(),
                id: Some("wamid.1".to_string()),
                kind: MessageKind::Text {
                    body: "Hello".to_string()
                },
            })
        );
    }

    #[test]
    fn test_decode_image_with_and_without_caption() {
        let body = payload(json!({
            "from": "1",
            "type": "image",
            "image": { "id": "media-9", "caption": "lab results", "mime_type": "image/jpeg" }
        }));
        let Notification::Message(msg) = Notification::decode(&body).unwrap() else {
            panic!("expected a message");
        };
        assert_eq!(
            msg.kind,
            MessageKind::Image {
                media_id: "media-9".to_string(),
                caption: Some("lab results".to_string()),
            }
        );

        let body = payload(json!({ "from": "1", "type": "image", "image": { "id": "media-9" } }));
        let Notification::Message(msg) = Notification::decode(&body).unwrap() else {
            panic!("expected a message");
        };
        assert_eq!(msg.kind.as_str(), "image");
        assert!(matches!(msg.kind, MessageKind::Image { caption: None, .. }));
    }

    #[test]
    fn test_decode_other_type() {
        let body = payload(json!({
            "from": "1",
            "type": "location",
            "location": { "latitude": 1.0, "longitude": 2.0 }
        }));
        let Notification::Message(msg) = Notification::decode(&body).unwrap() else {
            panic!("expected a message");
        };
        assert_eq!(
            msg.kind,
            MessageKind::Other {
                message_type: "location".to_string()
            }
        );
    }

    #[test]
    fn test_decode_empty_object() {
        assert_eq!(
            Notification::decode(b"{}").unwrap(),
            Notification::UnexpectedObject(None)
        );
    }

    #[test]
    fn test_decode_other_object_kind() {
        let body = json!({ "object": "page", "entry": [] }).to_string();
        assert_eq!(
            Notification::decode(body.as_bytes()).unwrap(),
            Notification::UnexpectedObject(Some("page".to_string()))
        );
    }

    #[test]
    fn test_decode_missing_nested_fields() {
        for body in [
            json!({ "object": WHATSAPP_OBJECT }),
            json!({ "object": WHATSAPP_OBJECT, "entry": [] }),
            json!({ "object": WHATSAPP_OBJECT, "entry": [{}] }),
            json!({ "object": WHATSAPP_OBJECT, "entry": [{ "changes": [{}] }] }),
            json!({ "object": WHATSAPP_OBJECT, "entry": [{ "changes": [{ "value": {} }] }] }),
            json!({ "object": WHATSAPP_OBJECT, "entry": [{ "changes": [{ "value": { "messages": [] } }] }] }),
        ] {
            let decoded = Notification::decode(body.to_string().as_bytes()).unwrap();
            assert_eq!(decoded, Notification::Empty, "body: {body}");
        }
    }

    #[test]
    fn test_decode_status_callback_is_empty() {
        let body = json!({
            "object": WHATSAPP_OBJECT,
            "entry": [{ "changes": [{ "field": "messages", "value": {
                "statuses": [{ "id": "wamid.1", "status": "delivered", "recipient_id": "1" }]
            } }] }]
        });
        assert_eq!(
            Notification::decode(body.to_string().as_bytes()).unwrap(),
            Notification::Empty
        );
    }

    #[test]
    fn test_decode_errors() {
        assert!(Notification::decode(b"not json").is_err());

        let body = payload(json!({ "from": "1", "type": "text" }));
        assert!(matches!(Notification::decode(&body), Err(Error::Decode(_))));

        let body = payload(json!({ "from": "1", "type": "image" }));
        assert!(matches!(Notification::decode(&body), Err(Error::Decode(_))));

        let body = payload(json!({ "type": "text", "text": { "body": "no sender" } }));
        assert!(matches!(Notification::decode(&body), Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_non_object_bodies() {
        assert_eq!(
            Notification::decode(b"[1, 2, 3]").unwrap(),
            Notification::UnexpectedObject(None)
        );
        let body = json!({ "object": 7 }).to_string();
        assert_eq!(
            Notification::decode(body.as_bytes()).unwrap(),
            Notification::UnexpectedObject(None)
        );
        let body = json!({ "object": WHATSAPP_OBJECT, "entry": "nope" }).to_string();
        assert_eq!(
            Notification::decode(body.as_bytes()).unwrap(),
            Notification::Empty
        );
    }

    #[test]
    fn test_decode_ignores_malformed_siblings() {
        let body = json!({
            "object": WHATSAPP_OBJECT,
            "entry": [
                { "changes": [{ "field": "messages", "value": { "messages": [
                    { "from": "15551234567", "type": "text", "text": { "body": "Hello" } },
                    { "type": "unsupported" }
                ] } }] },
                { "changes": [{ "field": 5, "value": { "messages": [{ "from": 1 }] } }] }
            ]
        });

        let Notification::Message(msg) = Notification::decode(body.to_string().as_bytes()).unwrap() else {
            panic!("expected a message");
        };
        assert_eq!(msg.from, "15551234567");
        assert_eq!(
            msg.kind,
            MessageKind::Text {
                body: "Hello".to_string()
            }
        );
    }

    #[test]
    fn test_decode_missing_type_is_other() {
        let body = payload(json!({ "from": "1" }));
        let Notification::Message(msg) = Notification::decode(&body).unwrap() else {
            panic!("expected a message");
        };
        assert_eq!(
            msg.kind,
            MessageKind::Other {
                message_type: "unknown".to_string()
            }
        );
    }
}
