use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use smartbooking_lib::types::{Department, DepartmentForm};
use smartbooking_lib::{DepartmentResource, MutationRequest, Settings, DEPARTMENT_RESOURCE};

use super::{auth, screen, show_page, ListArgs};
use crate::output::{print_departments, OutputFormat};

#[derive(Args)]
pub struct DepartmentsArgs {
    #[command(subcommand)]
    pub action: DepartmentsAction,
}

#[derive(Subcommand)]
pub enum DepartmentsAction {
    /// List one page of departments
    List(ListArgs),
    /// Show a single department
    Get {
        id: i64,
    },
    /// Create a department
    Create(DepartmentFields),
    /// Change fields of an existing department
    Update {
        id: i64,
        #[command(flatten)]
        fields: DepartmentFields,
    },
    /// Delete departments by ID
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Re-activate departments by ID
    Enable {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Deactivate departments by ID
    Disable {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

#[derive(Args, Default)]
pub struct DepartmentFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Mark the department active
    #[arg(long)]
    pub active: bool,
    /// Mark the department inactive
    #[arg(long)]
    pub inactive: bool,
}

impl DepartmentFields {
    pub fn apply(&self, form: &mut DepartmentForm) -> Result<()> {
        if self.active && self.inactive {
            bail!("--active and --inactive are mutually exclusive");
        }
        if let Some(name) = &self.name {
            form.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            let description = description.trim();
            form.description = (!description.is_empty()).then(|| description.to_string());
        }
        if self.active {
            form.is_active = true;
        } else if self.inactive {
            form.is_active = false;
        }
        Ok(())
    }
}

pub async fn run(args: &DepartmentsArgs, settings: &Settings, format: &OutputFormat) -> Result<()> {
    let client = auth::authenticated_client(settings)?;

    let request = match &args.action {
        DepartmentsAction::List(list) => {
            let coordinator =
                screen(DepartmentResource::departments(client), list.to_query()?, settings);
            coordinator.controller().reload().await;
            return show_page(coordinator.controller(), format, print_departments);
        }
        DepartmentsAction::Get { id } => {
            let department: Department = client.get_record(DEPARTMENT_RESOURCE, *id).await?;
            print_departments(&[department], format);
            return Ok(());
        }
        DepartmentsAction::Create(fields) => {
            let mut form = DepartmentForm::default();
            fields.apply(&mut form)?;
            MutationRequest::Create(form)
        }
        DepartmentsAction::Update { id, fields } => {
            let current: Department = client.get_record(DEPARTMENT_RESOURCE, *id).await?;
            let mut form = DepartmentForm::from(&current);
            fields.apply(&mut form)?;
            MutationRequest::Update(*id, form)
        }
        DepartmentsAction::Delete { ids } => MutationRequest::Delete(ids.clone()),
        DepartmentsAction::Enable { ids } => MutationRequest::SetActive(ids.clone(), true),
        DepartmentsAction::Disable { ids } => MutationRequest::SetActive(ids.clone(), false),
    };

    let coordinator = screen(
        DepartmentResource::departments(client),
        Default::default(),
        settings,
    );
    coordinator.execute(request).await?;
    show_page(coordinator.controller(), format, print_departments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_department_defaults_to_active() {
        let mut form = DepartmentForm::default();
        DepartmentFields {
            name: Some("  Research ".to_string()),
            ..DepartmentFields::default()
        }
        .apply(&mut form)
        .unwrap();
        assert_eq!(form.name, "Research");
        assert!(form.is_active);
        assert_eq!(form.description, None);
    }

    #[test]
    fn inactive_flag_and_blank_description() {
        let mut form = DepartmentForm {
            name: "Sales".to_string(),
            description: Some("Field sales".to_string()),
            ..DepartmentForm::default()
        };
        DepartmentFields {
            description: Some("   ".to_string()),
            inactive: true,
            ..DepartmentFields::default()
        }
        .apply(&mut form)
        .unwrap();
        assert!(!form.is_active);
        assert_eq!(form.description, None);
    }
}
