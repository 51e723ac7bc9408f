use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use smartbooking_lib::types::{User, UserForm, UserRole, UserStatus};
use smartbooking_lib::{MutationRequest, Settings, UserResource, USER_RESOURCE};

use super::{auth, screen, show_page, ListArgs};
use crate::output::{print_users, OutputFormat};

#[derive(Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub action: UsersAction,
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// List one page of users
    List(ListArgs),
    /// Show a single user
    Get {
        id: i64,
    },
    /// Create a user
    Create(UserFields),
    /// Change fields of an existing user
    Update {
        id: i64,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete users by ID
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Re-activate users by ID
    Enable {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Deactivate users by ID
    Disable {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

#[derive(Args, Default)]
pub struct UserFields {
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    /// admin, manager or user
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    /// active, inactive or suspended
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
}

impl UserFields {
    /// Overwrites the form fields that were given on the command line.
    pub fn apply(&self, form: &mut UserForm) -> Result<()> {
        let set = |target: &mut String, value: &Option<String>| {
            if let Some(v) = value {
                *target = v.trim().to_string();
            }
        };
        set(&mut form.username, &self.username);
        set(&mut form.email, &self.email);
        set(&mut form.first_name, &self.first_name);
        set(&mut form.last_name, &self.last_name);
        set(&mut form.department, &self.department);

        if let Some(role) = &self.role {
            form.role = role
                .parse::<UserRole>()
                .map_err(|_| anyhow!("unknown role '{}': use admin, manager or user", role))?;
        }
        if let Some(status) = &self.status {
            form.status = status.parse::<UserStatus>().map_err(|_| {
                anyhow!("unknown status '{}': use active, inactive or suspended", status)
            })?;
        }
        if self.phone.is_some() {
            form.phone = self.phone.clone();
        }
        if self.password.is_some() {
            form.password = self.password.clone();
        }
        Ok(())
    }
}

pub async fn run(args: &UsersArgs, settings: &Settings, format: &OutputFormat) -> Result<()> {
    let client = auth::authenticated_client(settings)?;

    let request = match &args.action {
        UsersAction::List(list) => {
            let coordinator = screen(UserResource::users(client), list.to_query()?, settings);
            coordinator.controller().reload().await;
            return show_page(coordinator.controller(), format, print_users);
        }
        UsersAction::Get { id } => {
            let user: User = client.get_record(USER_RESOURCE, *id).await?;
            print_users(&[user], format);
            return Ok(());
        }
        UsersAction::Create(fields) => {
            let mut form = UserForm::default();
            fields.apply(&mut form)?;
            MutationRequest::Create(form)
        }
        UsersAction::Update { id, fields } => {
            let current: User = client.get_record(USER_RESOURCE, *id).await?;
            let mut form = UserForm::from(&current);
            fields.apply(&mut form)?;
            MutationRequest::Update(*id, form)
        }
        UsersAction::Delete { ids } => MutationRequest::Delete(ids.clone()),
        UsersAction::Enable { ids } => MutationRequest::SetActive(ids.clone(), true),
        UsersAction::Disable { ids } => MutationRequest::SetActive(ids.clone(), false),
    };

    let coordinator = screen(UserResource::users(client), Default::default(), settings);
    coordinator.execute(request).await?;
    show_page(coordinator.controller(), format, print_users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_given_fields() {
        let mut form = UserForm {
            username: "jdoe".to_string(),
            email: "john.doe@smartbooking.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            ..UserForm::default()
        };
        let fields = UserFields {
            department: Some(" Facilities ".to_string()),
            role: Some("Manager".to_string()),
            ..UserFields::default()
        };
        fields.apply(&mut form).unwrap();
        assert_eq!(form.username, "jdoe");
        assert_eq!(form.department, "Facilities");
        assert_eq!(form.role, UserRole::Manager);
        assert_eq!(form.status, UserStatus::Active);
        assert_eq!(form.password, None);
    }

    #[test]
    fn apply_rejects_unknown_role() {
        let fields = UserFields {
            role: Some("owner".to_string()),
            ..UserFields::default()
        };
        assert!(fields.apply(&mut UserForm::default()).is_err());
    }
}
