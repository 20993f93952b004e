//! Demo content for an empty store.

use crate::address::NodeHandle;
use crate::error::RepoError;
use crate::repo::NodeRepository;
use crate::types::NodeKind;
use tracing::info;

/// Provision a small demo hierarchy when the store is empty. A store with
/// any existing entries is left untouched.
pub fn ensure_demo_data(repo: &NodeRepository) -> Result<(), RepoError> {
    if !repo
        .storage()
        .entries(&NodeHandle::root().rel_path())?
        .iter()
        .any(|e| e.is_dir)
    {
        info!("seeding demo content into empty store");
        seed(repo)?;
    }
    Ok(())
}

fn seed(repo: &NodeRepository) -> Result<(), RepoError> {
    let company = repo.create("", "Acme Holdings", NodeKind::Company)?;
    let dc = repo.create(&company.address(), "North Station", NodeKind::Dc)?;
    let service = repo.create(&dc.address(), "RDS Farm", NodeKind::Service)?;
    repo.save_document(
        &service,
        "overview.md",
        "# RDS Farm\nRemote desktop farm serving the head office.",
    )?;
    repo.save_document(
        &service,
        "passport.md",
        "## Service passport\nOwner, lifecycle stage, and contacts.",
    )?;
    repo.save_document(
        &service,
        "operations.md",
        "## Operations\nPatching windows and escalation paths.",
    )?;

    let branch = repo.create("", "Branch Office", NodeKind::Company)?;
    let annex = repo.create(&branch.address(), "South Annex", NodeKind::Dc)?;
    let reception = repo.create(&annex.address(), "Reception", NodeKind::Document)?;
    repo.save_document(
        &reception,
        "index.md",
        "# Reception\nVisitor intake area and badge printer notes.",
    )?;
    Ok(())
}
