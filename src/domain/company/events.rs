use serde::Serialize;

use super::{CompanyUpdate, NewCompany, Selector};

/// Mutation kinds mirrored onto the event stream.
///
/// The wire string doubles as the Kafka message key for the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventAction {
    #[serde(rename = "create_company")]
    Create,
    #[serde(rename = "delete_company")]
    Delete,
    #[serde(rename = "update_company")]
    Update,
}

impl EventAction {
    pub fn as_str(self) -> &'static str {
        match self {
            EventAction::Create => "create_company",
            EventAction::Delete => "delete_company",
            EventAction::Update => "update_company",
        }
    }
}

/// Which kind of identifier addresses the entity in an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    Uuid,
    Name,
}

impl Selector {
    pub fn id_kind(&self) -> IdKind {
        match self {
            Selector::ById(_) => IdKind::Uuid,
            Selector::ByName(_) => IdKind::Name,
        }
    }
}

/// Envelope published to the stream after a committed mutation.
///
/// `data` carries the full entity fields for creates, the sparse set of
/// updated fields for updates, and an empty object for deletes.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyEvent {
    pub action: EventAction,
    pub identifier: String,
    pub id_type: IdKind,
    pub data: serde_json::Value,
}

impl CompanyEvent {
    pub fn created(company: &NewCompany) -> Result<Self, serde_json::Error> {
        Ok(Self {
            action: EventAction::Create,
            identifier: company.id.to_string(),
            id_type: IdKind::Uuid,
            data: serde_json::to_value(company)?,
        })
    }

    pub fn deleted(selector: &Selector) -> Self {
        Self {
            action: EventAction::Delete,
            identifier: selector.identifier(),
            id_type: selector.id_kind(),
            data: serde_json::json!({}),
        }
    }

    pub fn updated(update: &CompanyUpdate, selector: &Selector) -> Result<Self, serde_json::Error> {
        Ok(Self {
            action: EventAction::Update,
            identifier: selector.identifier(),
            id_type: selector.id_kind(),
            data: serde_json::to_value(update)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::company::CompanyType;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn create_event_envelope() {
        let company = NewCompany {
            id: Uuid::nil(),
            name: "Acme".to_string(),
            description: Some("widgets".to_string()),
            employees_count: 5,
            registered: true,
            company_type: CompanyType::Corporations,
        };

        let event = CompanyEvent::created(&company).unwrap();
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(
            value,
            json!({
                "action": "create_company",
                "identifier": "00000000-0000-0000-0000-000000000000",
                "id_type": "uuid",
                "data": {
                    "id": "00000000-0000-0000-0000-000000000000",
                    "name": "Acme",
                    "description": "widgets",
                    "employees_count": 5,
                    "registered": true,
                    "type": "Corporations"
                }
            })
        );
    }

    #[test]
    fn delete_event_has_empty_payload() {
        let selector = Selector::ByName("Acme".to_string());
        let event = CompanyEvent::deleted(&selector);
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(
            value,
            json!({
                "action": "delete_company",
                "identifier": "Acme",
                "id_type": "name",
                "data": {}
            })
        );
    }

    #[test]
    fn update_event_carries_only_the_set_fields() {
        let id = Uuid::nil();
        let update = CompanyUpdate {
            id: Some(id),
            name: None,
            description: None,
            employees_count: Some(6),
            registered: None,
            company_type: None,
        };
        let selector = update.selector().unwrap();

        let event = CompanyEvent::updated(&update, &selector).unwrap();
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(
            value,
            json!({
                "action": "update_company",
                "identifier": "00000000-0000-0000-0000-000000000000",
                "id_type": "uuid",
                "data": {
                    "id": "00000000-0000-0000-0000-000000000000",
                    "employees_count": 6
                }
            })
        );
    }

    #[test]
    fn action_strings_double_as_message_keys() {
        assert_eq!(EventAction::Create.as_str(), "create_company");
        assert_eq!(EventAction::Delete.as_str(), "delete_company");
        assert_eq!(EventAction::Update.as_str(), "update_company");
    }
}
