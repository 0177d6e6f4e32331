use opsimate::application::error::ApplicationError;
use opsimate::domain::alert::AlertFilter;
use opsimate::domain::service::NewService;
use opsimate::domain::user::User;
use opsimate::infrastructure::di::ServiceContainer;
use opsimate::util::testing::setup_test_db;

fn alert_titles(container: &ServiceContainer) -> Vec<String> {
    container
        .alert_service
        .get_alerts(&AlertFilter::default())
        .unwrap()
        .into_iter()
        .map(|a| a.title)
        .collect()
}

#[test]
fn given_tag_shared_by_services_when_unlinked_one_by_one_then_tag_alerts_survive_until_last() {
    let db = setup_test_db();
    let container = ServiceContainer::with_pool(db.pool.clone());
    let user = User::default();

    let api = container
        .service_service
        .create_service(NewService::named("api").unwrap(), &user)
        .unwrap();
    let worker = container
        .service_service
        .create_service(NewService::named("worker").unwrap(), &user)
        .unwrap();
    let tag_id = container
        .tag_service
        .create_tag("web", None)
        .unwrap()
        .id
        .unwrap();
    container.tag_service.add_tag_to_service(api.id, tag_id).unwrap();
    container
        .tag_service
        .add_tag_to_service(worker.id, tag_id)
        .unwrap();

    let alerts = &container.alert_service;
    alerts.record_alert(Some(api.id), "web", "api 5xx").unwrap();
    alerts.record_alert(Some(worker.id), "web", "worker backlog").unwrap();
    alerts.record_alert(None, "web", "certificate expiring").unwrap();

    container
        .tag_service
        .remove_tag_from_service(api.id, tag_id)
        .unwrap();
    assert_eq!(
        alert_titles(&container),
        vec!["worker backlog", "certificate expiring"]
    );

    container
        .tag_service
        .remove_tag_from_service(worker.id, tag_id)
        .unwrap();
    assert!(alert_titles(&container).is_empty());

    // the tag itself outlives its links
    assert!(container.tag_service.get_tag(tag_id).unwrap().is_some());
}

#[test]
fn given_tag_with_alerts_when_deleted_then_only_its_alerts_cleared() {
    let db = setup_test_db();
    let container = ServiceContainer::with_pool(db.pool.clone());
    let user = User::default();

    let api = container
        .service_service
        .create_service(NewService::named("api").unwrap(), &user)
        .unwrap();
    let web = container.tag_service.create_tag("web", None).unwrap();
    let web_id = web.id.unwrap();
    container.tag_service.add_tag_to_service(api.id, web_id).unwrap();

    let alerts = &container.alert_service;
    alerts.record_alert(Some(api.id), "web", "api 5xx").unwrap();
    alerts.record_alert(None, "web", "certificate expiring").unwrap();
    alerts.record_alert(Some(api.id), "web-edge", "edge latency").unwrap();

    container.tag_service.delete_tag(web_id).unwrap();

    assert_eq!(alert_titles(&container), vec!["edge latency"]);
    assert!(container
        .tag_service
        .get_service_tags(api.id)
        .unwrap()
        .is_empty());
    assert!(matches!(
        container.tag_service.delete_tag(web_id),
        Err(ApplicationError::TagNotFound(id)) if id == web_id
    ));
}

#[test]
fn given_renamed_tag_when_unlinked_then_alerts_under_old_name_remain() {
    let db = setup_test_db();
    let container = ServiceContainer::with_pool(db.pool.clone());
    let user = User::default();

    let api = container
        .service_service
        .create_service(NewService::named("api").unwrap(), &user)
        .unwrap();
    let tag_id = container
        .tag_service
        .create_tag("web", None)
        .unwrap()
        .id
        .unwrap();
    container.tag_service.add_tag_to_service(api.id, tag_id).unwrap();
    container
        .alert_service
        .record_alert(Some(api.id), "web", "api 5xx")
        .unwrap();

    container
        .tag_service
        .update_tag(tag_id, Some("frontend"), None)
        .unwrap();
    container
        .tag_service
        .remove_tag_from_service(api.id, tag_id)
        .unwrap();

    assert_eq!(alert_titles(&container), vec!["api 5xx"]);
}
