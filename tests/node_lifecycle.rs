//! End-to-end node lifecycle over the filesystem backend.

use arbor::address::NodeHandle;
use arbor::error::RepoError;
use arbor::repo::{NodeRepository, NETWORK_DOC, SERVICE_DOCS};
use arbor::storage::FsStorage;
use arbor::types::{NetworkInterface, NodeKind};
use std::sync::Arc;

fn fs_repo() -> (tempfile::TempDir, NodeRepository) {
    let temp = tempfile::tempdir().unwrap();
    let storage = Arc::new(FsStorage::create(temp.path()).unwrap());
    (temp, NodeRepository::new(storage))
}

#[test]
fn test_company_dc_service_scenario() {
    let (_temp, repo) = fs_repo();

    let company = repo.create("", "Acme", NodeKind::Company).unwrap();
    assert_eq!(company.address(), "acme");

    let dc = repo.create("acme", "West", NodeKind::Dc).unwrap();
    assert_eq!(dc.address(), "acme/west");

    let service = repo.create("acme/west", "RDS", NodeKind::Service).unwrap();
    assert_eq!(service.address(), "acme/west/rds");
    for (name, _) in SERVICE_DOCS {
        assert!(
            repo.storage().exists(&service.rel_path().join(name)),
            "missing service document: {}",
            name
        );
    }
    let table = repo
        .storage()
        .read(&service.rel_path().join(NETWORK_DOC))
        .unwrap();
    assert_eq!(
        table,
        "| Name | IP | Mask | Gateway | DNS |\n| --- | --- | --- | --- | --- |\n"
    );

    // A second sibling with the same title takes the -2 suffix.
    let second = repo.create("acme/west", "RDS", NodeKind::Service).unwrap();
    assert_eq!(second.address(), "acme/west/rds-2");
}

#[test]
fn test_service_network_round_trip() {
    let (_temp, repo) = fs_repo();
    repo.create("", "Acme", NodeKind::Company).unwrap();
    repo.create("acme", "West", NodeKind::Dc).unwrap();
    let service = repo.create("acme/west", "RDS", NodeKind::Service).unwrap();

    let items = vec![NetworkInterface {
        name: "eth0".to_string(),
        ip: "10.0.0.1".to_string(),
        mask: "255.255.255.0".to_string(),
        gateway: "10.0.0.254".to_string(),
        dns: "8.8.8.8".to_string(),
    }];
    repo.set_service_network(&service, items.clone()).unwrap();

    let descriptor = repo.load_meta(&service).unwrap();
    assert_eq!(descriptor.service_network.unwrap().items, items);
    assert_eq!(
        repo.storage()
            .read(&service.rel_path().join(NETWORK_DOC))
            .unwrap(),
        "| Name | IP | Mask | Gateway | DNS |\n| --- | --- | --- | --- | --- |\n| eth0 | 10.0.0.1 | 255.255.255.0 | 10.0.0.254 | 8.8.8.8 |"
    );
}

#[test]
fn test_leaf_parent_retargets_to_container() {
    let (_temp, repo) = fs_repo();
    repo.create("", "Acme", NodeKind::Company).unwrap();
    repo.create("acme", "West", NodeKind::Dc).unwrap();
    let document = repo
        .create("acme/west", "Floor Plan", NodeKind::Document)
        .unwrap();

    let sibling = repo
        .create(&document.address(), "Backup Server", NodeKind::Server)
        .unwrap();
    assert_eq!(sibling.address(), "acme/west/backup-server");
}

#[test]
fn test_schema_violations_leave_no_trace() {
    let (_temp, repo) = fs_repo();
    repo.create("", "Acme", NodeKind::Company).unwrap();

    let err = repo.create("acme", "Farm", NodeKind::Service).unwrap_err();
    assert!(matches!(err, RepoError::InvalidChildType { .. }));
    assert!(!repo.storage().exists(std::path::Path::new("acme/farm")));

    let err = repo.create("", "Solo DC", NodeKind::Dc).unwrap_err();
    assert!(matches!(err, RepoError::InvalidChildType { .. }));
    let children = repo.list_children(&NodeHandle::root()).unwrap();
    assert_eq!(children.len(), 1);
}

#[test]
fn test_bad_addresses_rejected_before_storage() {
    let (_temp, repo) = fs_repo();
    for addr in ["..", "a/../b", "Acme", "a b"] {
        assert!(
            matches!(repo.resolve(addr), Err(RepoError::InvalidAddress(_))),
            "address should be invalid: {}",
            addr
        );
    }
}

#[test]
fn test_transliterated_titles_address_cleanly() {
    let (_temp, repo) = fs_repo();
    let company = repo.create("", "Первый Дом", NodeKind::Company).unwrap();
    assert_eq!(company.address(), "pervyi-dom");
    // The generated address resolves straight back.
    let handle = repo.resolve("pervyi-dom").unwrap();
    assert_eq!(repo.load_meta(&handle).unwrap().title, "Первый Дом");
}

#[test]
fn test_breadcrumb_and_listing_agree_on_membership() {
    let (_temp, repo) = fs_repo();
    repo.create("", "Acme", NodeKind::Company).unwrap();
    repo.create("acme", "West", NodeKind::Dc).unwrap();
    let service = repo.create("acme/west", "RDS", NodeKind::Service).unwrap();

    let crumbs = repo.breadcrumb(&service).unwrap();
    assert_eq!(crumbs.len(), 3);
    assert_eq!(crumbs[0].path, "acme");
    assert_eq!(crumbs[1].path, "acme/west");
    assert_eq!(crumbs[2].path, "acme/west/rds");

    let dc_handle = repo.resolve("acme/west").unwrap();
    let children = repo.list_children(&dc_handle).unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].path, "acme/west/rds");
    assert_eq!(children[0].kind, NodeKind::Service);
}
