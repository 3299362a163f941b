use zendesk_domain::{Brand, DynamicContentItem, Group, Organization, Target};

use crate::client::ZendeskClient;
use crate::error::ClientError;

impl ZendeskClient {
    // ── Brands ────────────────────────────────────────────────────────────────

    pub async fn create_brand(&self, brand: &Brand) -> Result<Brand, ClientError> {
        self.post_entity("/brands.json", "brand", brand).await
    }

    pub async fn get_brand(&self, id: i64) -> Result<Brand, ClientError> {
        self.get_entity(&format!("/brands/{}.json", id), "brand").await
    }

    pub async fn update_brand(&self, id: i64, brand: &Brand) -> Result<Brand, ClientError> {
        self.put_entity(&format!("/brands/{}.json", id), "brand", brand).await
    }

    pub async fn delete_brand(&self, id: i64) -> Result<(), ClientError> {
        self.delete_path(&format!("/brands/{}.json", id)).await
    }

    // ── Groups ────────────────────────────────────────────────────────────────

    pub async fn create_group(&self, group: &Group) -> Result<Group, ClientError> {
        self.post_entity("/groups.json", "group", group).await
    }

    pub async fn get_group(&self, id: i64) -> Result<Group, ClientError> {
        self.get_entity(&format!("/groups/{}.json", id), "group").await
    }

    pub async fn update_group(&self, id: i64, group: &Group) -> Result<Group, ClientError> {
        self.put_entity(&format!("/groups/{}.json", id), "group", group).await
    }

    pub async fn delete_group(&self, id: i64) -> Result<(), ClientError> {
        self.delete_path(&format!("/groups/{}.json", id)).await
    }

    // ── Organizations ─────────────────────────────────────────────────────────

    pub async fn create_organization(&self, org: &Organization) -> Result<Organization, ClientError> {
        self.post_entity("/organizations.json", "organization", org).await
    }

    pub async fn get_organization(&self, id: i64) -> Result<Organization, ClientError> {
        self.get_entity(&format!("/organizations/{}.json", id), "organization").await
    }

    pub async fn update_organization(
        &self,
        id: i64,
        org: &Organization,
    ) -> Result<Organization, ClientError> {
        self.put_entity(&format!("/organizations/{}.json", id), "organization", org).await
    }

    pub async fn delete_organization(&self, id: i64) -> Result<(), ClientError> {
        self.delete_path(&format!("/organizations/{}.json", id)).await
    }

    // ── Targets ───────────────────────────────────────────────────────────────

    pub async fn create_target(&self, target: &Target) -> Result<Target, ClientError> {
        self.post_entity("/targets.json", "target", target).await
    }

    pub async fn get_target(&self, id: i64) -> Result<Target, ClientError> {
        self.get_entity(&format!("/targets/{}.json", id), "target").await
    }

    pub async fn update_target(&self, id: i64, target: &Target) -> Result<Target, ClientError> {
        self.put_entity(&format!("/targets/{}.json", id), "target", target).await
    }

    pub async fn delete_target(&self, id: i64) -> Result<(), ClientError> {
        self.delete_path(&format!("/targets/{}.json", id)).await
    }

    // ── Dynamic content ───────────────────────────────────────────────────────

    pub async fn create_dynamic_content_item(
        &self,
        item: &DynamicContentItem,
    ) -> Result<DynamicContentItem, ClientError> {
        self.post_entity("/dynamic_content/items.json", "item", item).await
    }

    pub async fn get_dynamic_content_item(&self, id: i64) -> Result<DynamicContentItem, ClientError> {
        self.get_entity(&format!("/dynamic_content/items/{}.json", id), "item").await
    }

    pub async fn update_dynamic_content_item(
        &self,
        id: i64,
        item: &DynamicContentItem,
    ) -> Result<DynamicContentItem, ClientError> {
        self.put_entity(&format!("/dynamic_content/items/{}.json", id), "item", item).await
    }

    pub async fn delete_dynamic_content_item(&self, id: i64) -> Result<(), ClientError> {
        self.delete_path(&format!("/dynamic_content/items/{}.json", id)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };
    use zendesk_domain::{DynamicContentItem, DynamicContentVariant, Group, Organization, Target};

    use crate::client::test_client;

    #[tokio::test]
    async fn create_group_sends_only_the_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/groups.json"))
            .and(body_json(json!({ "group": { "name": "Tier 2" } })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "group": {
                    "id":   360002,
                    "url":  "https://acme.zendesk.com/api/v2/groups/360002.json",
                    "name": "Tier 2",
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let group = Group { name: "Tier 2".into(), ..Default::default() };
        let created = test_client(&server).create_group(&group).await.unwrap();
        assert_eq!(created.id, Some(360002));
        assert!(created.url.unwrap().ends_with("/groups/360002.json"));
    }

    #[tokio::test]
    async fn update_organization() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/organizations/3.json"))
            .and(body_partial_json(json!({
                "organization": { "name": "Acme", "domain_names": ["acme.test"] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organization": {
                    "id": 3, "name": "Acme", "domain_names": ["acme.test"],
                    "shared_tickets": true, "tags": ["vip"],
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let org = Organization {
            name:         "Acme".into(),
            domain_names: vec!["acme.test".into()],
            ..Default::default()
        };
        let updated = test_client(&server).update_organization(3, &org).await.unwrap();
        assert!(updated.shared_tickets);
        assert_eq!(updated.tags, vec!["vip".to_string()]);
    }

    #[tokio::test]
    async fn get_target_decodes_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/targets/11.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "target": {
                    "id": 11, "type": "email_target", "title": "Ops mail",
                    "active": true, "email": "ops@example.com", "subject": "Alert",
                }
            })))
            .mount(&server)
            .await;

        let target: Target = test_client(&server).get_target(11).await.unwrap();
        assert_eq!(target.target_type, "email_target");
        assert_eq!(target.email.as_deref(), Some("ops@example.com"));
    }

    #[tokio::test]
    async fn dynamic_content_uses_item_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dynamic_content/items.json"))
            .and(body_partial_json(json!({
                "item": {
                    "name": "greeting",
                    "default_locale_id": 1,
                    "variants": [{ "content": "Hello", "locale_id": 1, "active": true, "default": true }],
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "item": {
                    "id": 99, "name": "greeting", "default_locale_id": 1,
                    "variants": [{ "id": 5, "content": "Hello", "locale_id": 1, "active": true, "default": true }],
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let item = DynamicContentItem {
            id:                None,
            name:              "greeting".into(),
            default_locale_id: 1,
            variants: vec![DynamicContentVariant {
                id:        None,
                content:   "Hello".into(),
                locale_id: 1,
                active:    true,
                default:   true,
            }],
        };
        let created = test_client(&server).create_dynamic_content_item(&item).await.unwrap();
        assert_eq!(created.id, Some(99));
        assert_eq!(created.variants[0].id, Some(5));
    }
}
