//! Project use-case service.

use crate::model::project::{Project, ProjectFilter, ProjectId};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service wrapper for project operations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists projects ordered by client and name, keeping those `filter` admits.
    pub fn list_projects(&self, filter: ProjectFilter) -> RepoResult<Vec<Project>> {
        let mut projects = self.repo.list_projects()?;
        projects.retain(|project| filter.matches(project));
        Ok(projects)
    }

    /// Projects offered by the work entry form.
    pub fn active_projects(&self) -> RepoResult<Vec<Project>> {
        self.list_projects(ProjectFilter::Active)
    }

    pub fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.repo.get_project(id)
    }

    /// Creates (`id == 0`) or updates a project and returns its id.
    pub fn save_project(&self, project: &Project) -> RepoResult<ProjectId> {
        let id = self.repo.save_project(project)?;
        info!(
            "event=project_save module=service status=ok id={id} created={}",
            project.id == 0
        );
        Ok(id)
    }

    /// Deletes a project together with its work entries and contact links.
    pub fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        self.repo.delete_project(id)?;
        info!("event=project_delete module=service status=ok id={id}");
        Ok(())
    }
}
