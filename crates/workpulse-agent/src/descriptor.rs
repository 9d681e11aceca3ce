//! Descriptor construction: explicit, ordered field-by-field defaulting of a
//! push payload, testable in isolation from payload parsing.

use chrono::{DateTime, Utc};

use workpulse_shared::constants::{
    ACTION_DISMISS, ACTION_OPEN, DEFAULT_BADGE, DEFAULT_BODY, DEFAULT_ICON, DEFAULT_TITLE,
    TAG_NAMESPACE,
};
use workpulse_shared::payload::PushPayload;
use workpulse_shared::types::{NotificationAction, NotificationDescriptor};

/// Build the descriptor for one push event.
///
/// `payload` is `None` when the push carried no body or the body was not
/// JSON; the result is then the full brand default. Otherwise each payload
/// field falls back to its default individually. A missing `tag` gets a
/// unique synthesized one so concurrent pushes do not collapse into a
/// single visible notification.
pub fn build_descriptor(
    payload: Option<PushPayload>,
    received_at: DateTime<Utc>,
) -> NotificationDescriptor {
    let payload = payload.unwrap_or_default();

    NotificationDescriptor {
        title: payload
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        body: payload
            .body_text()
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_BODY.to_string()),
        icon: payload
            .icon
            .clone()
            .unwrap_or_else(|| DEFAULT_ICON.to_string()),
        badge: payload
            .badge
            .clone()
            .unwrap_or_else(|| DEFAULT_BADGE.to_string()),
        tag: payload
            .tag
            .clone()
            .unwrap_or_else(|| synthesize_tag(received_at)),
        data: payload.data.clone().unwrap_or_default(),
        actions: payload.actions.clone().unwrap_or_else(default_actions),
    }
}

/// The two actions every notification offers when the payload supplies none.
pub fn default_actions() -> Vec<NotificationAction> {
    vec![
        NotificationAction {
            action: ACTION_OPEN.to_string(),
            title: "Open".to_string(),
        },
        NotificationAction {
            action: ACTION_DISMISS.to_string(),
            title: "Dismiss".to_string(),
        },
    ]
}

fn synthesize_tag(received_at: DateTime<Utc>) -> String {
    format!("{TAG_NAMESPACE}-{}", received_at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use workpulse_shared::constants::{ACTION_DISMISS, ACTION_OPEN};

    fn at() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_123).unwrap()
    }

    #[test]
    fn test_absent_payload_yields_full_default() {
        let d = build_descriptor(None, at());

        assert_eq!(d.title, DEFAULT_TITLE);
        assert_eq!(d.body, DEFAULT_BODY);
        assert_eq!(d.icon, DEFAULT_ICON);
        assert_eq!(d.badge, DEFAULT_BADGE);
        assert_eq!(d.tag, "workpulse-1700000000123");
        assert_eq!(d.actions.len(), 2);
        assert_eq!(d.actions[0].action, ACTION_OPEN);
        assert_eq!(d.actions[1].action, ACTION_DISMISS);
        assert!(d.data.kind.is_none());
    }

    #[test]
    fn test_empty_object_payload_yields_full_default() {
        let payload = PushPayload::parse(b"{}").unwrap();
        let d = build_descriptor(Some(payload), at());

        assert_eq!(d.title, DEFAULT_TITLE);
        assert_eq!(d.body, DEFAULT_BODY);
        assert_eq!(d.actions.len(), 2);
    }

    #[test]
    fn test_payload_fields_win_individually() {
        let payload =
            PushPayload::parse(br#"{"title": "Contract signed", "tag": "c-1"}"#).unwrap();
        let d = build_descriptor(Some(payload), at());

        assert_eq!(d.title, "Contract signed");
        assert_eq!(d.tag, "c-1");
        // Unspecified fields still default.
        assert_eq!(d.body, DEFAULT_BODY);
        assert_eq!(d.icon, DEFAULT_ICON);
    }

    #[test]
    fn test_legacy_message_key_fills_body() {
        let payload = PushPayload::parse(br#"{"message": "Milestone approved"}"#).unwrap();
        let d = build_descriptor(Some(payload), at());
        assert_eq!(d.body, "Milestone approved");
    }

    #[test]
    fn test_payload_actions_replace_defaults() {
        let payload = PushPayload::parse(
            br#"{"actions": [{"action": "view", "title": "View contract"}]}"#,
        )
        .unwrap();
        let d = build_descriptor(Some(payload), at());

        assert_eq!(d.actions.len(), 1);
        assert_eq!(d.actions[0].action, "view");
    }

    #[test]
    fn test_synthesized_tags_differ_across_receive_times() {
        let a = build_descriptor(None, DateTime::from_timestamp_millis(1_000).unwrap());
        let b = build_descriptor(None, DateTime::from_timestamp_millis(2_000).unwrap());
        assert_ne!(a.tag, b.tag);
    }
}
