//! Contact use-case service, including contact/project links.

use crate::model::contact::{Contact, ContactId};
use crate::model::project::{Project, ProjectId};
use crate::repo::contact_repo::ContactRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service wrapper for contacts.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts()
    }

    pub fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.get_contact(id)
    }

    pub fn save_contact(&self, contact: &Contact) -> RepoResult<ContactId> {
        let id = self.repo.save_contact(contact)?;
        info!(
            "event=contact_save module=service status=ok id={id} created={}",
            contact.id == 0
        );
        Ok(id)
    }

    /// Deletes a contact and its project links.
    pub fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        self.repo.delete_contact(id)?;
        info!("event=contact_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn link_project(&self, contact_id: ContactId, project_id: ProjectId) -> RepoResult<()> {
        self.repo.link_project(contact_id, project_id)
    }

    pub fn unlink_project(&self, contact_id: ContactId, project_id: ProjectId) -> RepoResult<()> {
        self.repo.unlink_project(contact_id, project_id)
    }

    pub fn projects_for_contact(&self, contact_id: ContactId) -> RepoResult<Vec<Project>> {
        self.repo.list_projects_for_contact(contact_id)
    }

    pub fn contacts_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts_for_project(project_id)
    }
}
