use reqwest::Method;
use serde::Deserialize;
use tracing::debug;
use zendesk_domain::{TicketField, TicketForm};

use crate::client::ZendeskClient;
use crate::error::ClientError;

#[derive(Deserialize)]
struct TicketFieldPage {
    #[serde(default)]
    ticket_fields: Vec<TicketField>,
    next_page: Option<String>,
}

impl ZendeskClient {
    // ── Ticket fields ─────────────────────────────────────────────────────────

    /// Every ticket field of the account, following `next_page` links.
    pub async fn list_ticket_fields(&self) -> Result<Vec<TicketField>, ClientError> {
        let mut url = self.url("/ticket_fields.json");
        let mut fields = Vec::new();
        loop {
            debug!(%url, "listing ticket fields");
            let resp = self.send(self.request(Method::GET, &url), &url).await?;
            let page: TicketFieldPage = resp.json().await.map_err(|e| ClientError::Decode {
                url:     url.clone(),
                message: e.to_string(),
            })?;
            fields.extend(page.ticket_fields);
            match page.next_page {
                Some(next) if !next.is_empty() && next != url => url = next,
                _ => break,
            }
        }
        Ok(fields)
    }

    pub async fn create_ticket_field(&self, field: &TicketField) -> Result<TicketField, ClientError> {
        self.post_entity("/ticket_fields.json", "ticket_field", field).await
    }

    pub async fn get_ticket_field(&self, id: i64) -> Result<TicketField, ClientError> {
        self.get_entity(&format!("/ticket_fields/{}.json", id), "ticket_field").await
    }

    pub async fn update_ticket_field(
        &self,
        id: i64,
        field: &TicketField,
    ) -> Result<TicketField, ClientError> {
        self.put_entity(&format!("/ticket_fields/{}.json", id), "ticket_field", field).await
    }

    pub async fn delete_ticket_field(&self, id: i64) -> Result<(), ClientError> {
        self.delete_path(&format!("/ticket_fields/{}.json", id)).await
    }

    // ── Ticket forms ──────────────────────────────────────────────────────────

    pub async fn create_ticket_form(&self, form: &TicketForm) -> Result<TicketForm, ClientError> {
        self.post_entity("/ticket_forms.json", "ticket_form", form).await
    }

    pub async fn get_ticket_form(&self, id: i64) -> Result<TicketForm, ClientError> {
        self.get_entity(&format!("/ticket_forms/{}.json", id), "ticket_form").await
    }

    pub async fn update_ticket_form(
        &self,
        id: i64,
        form: &TicketForm,
    ) -> Result<TicketForm, ClientError> {
        self.put_entity(&format!("/ticket_forms/{}.json", id), "ticket_form", form).await
    }

    pub async fn delete_ticket_form(&self, id: i64) -> Result<(), ClientError> {
        self.delete_path(&format!("/ticket_forms/{}.json", id)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };
    use zendesk_domain::{CustomFieldOption, TicketField, TicketForm};

    use crate::client::test_client;

    #[tokio::test]
    async fn list_ticket_fields_follows_next_page() {
        let server = MockServer::start().await;
        let next = format!("{}/ticket_fields.json?page=2", server.uri());
        Mock::given(method("GET"))
            .and(path("/ticket_fields.json"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ticket_fields": [{ "id": 2, "type": "checkbox", "title": "Second" }],
                "next_page":     null,
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ticket_fields.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ticket_fields": [{ "id": 1, "type": "subject", "title": "Subject" }],
                "next_page":     next,
            })))
            .mount(&server)
            .await;

        let fields = test_client(&server).list_ticket_fields().await.unwrap();
        let ids: Vec<_> = fields.iter().filter_map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn list_ticket_fields_stops_on_repeated_next_page() {
        let server = MockServer::start().await;
        let same = format!("{}/ticket_fields.json", server.uri());
        Mock::given(method("GET"))
            .and(path("/ticket_fields.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ticket_fields": [{ "id": 1, "type": "subject", "title": "Subject" }],
                "next_page":     same,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let fields = test_client(&server).list_ticket_fields().await.unwrap();
        assert_eq!(fields.len(), 1);
    }

    #[tokio::test]
    async fn create_ticket_field_wraps_body_in_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ticket_fields.json"))
            .and(body_partial_json(json!({
                "ticket_field": {
                    "type":  "tagger",
                    "title": "Product",
                    "custom_field_options": [{ "name": "Widget", "value": "widget" }],
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "ticket_field": {
                    "id":    360001,
                    "url":   "https://acme.zendesk.com/api/v2/ticket_fields/360001.json",
                    "type":  "tagger",
                    "title": "Product",
                    "custom_field_options": [{ "id": 77, "name": "Widget", "value": "widget" }],
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let field = TicketField {
            field_type: "tagger".into(),
            title:      "Product".into(),
            custom_field_options: vec![CustomFieldOption {
                id:    None,
                name:  "Widget".into(),
                value: "widget".into(),
            }],
            ..Default::default()
        };
        let created = test_client(&server).create_ticket_field(&field).await.unwrap();
        assert_eq!(created.id, Some(360001));
        assert_eq!(created.custom_field_options[0].id, Some(77));
    }

    #[tokio::test]
    async fn ticket_form_update_and_delete_hit_item_paths() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/ticket_forms/12.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ticket_form": { "id": 12, "name": "Renamed", "ticket_field_ids": [1, 2] }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/ticket_forms/12.json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let form = TicketForm { name: "Renamed".into(), ..Default::default() };
        let updated = client.update_ticket_form(12, &form).await.unwrap();
        assert_eq!(updated.ticket_field_ids, vec![1, 2]);
        client.delete_ticket_form(12).await.unwrap();
    }
}
