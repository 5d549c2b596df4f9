use crate::api::{CreateUser, UpdateUser, User, UserType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateUserForm {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

impl CreateUserForm {
    pub fn to_payload(&self) -> Result<CreateUser, String> {
        let user_name = self.user_name.trim();
        let email = self.email.trim();
        if user_name.is_empty() {
            return Err("Username is required".into());
        }
        validate_email(email)?;
        if self.password.len() < 8 {
            return Err("Password must be at least 8 characters".into());
        }
        Ok(CreateUser {
            user_name: user_name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            user_type: self.user_type,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditUserForm {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub user_type: UserType,
}

impl EditUserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            user_type: user.user_type,
        }
    }

    pub fn to_payload(&self) -> Result<UpdateUser, String> {
        let email = self.email.trim();
        validate_email(email)?;
        Ok(UpdateUser {
            id: self.id.clone(),
            email: email.to_string(),
            user_type: self.user_type,
        })
    }
}

fn validate_email(email: &str) -> Result<(), String> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err("Enter a valid email address".into()),
    }
}

pub fn parse_user_type(value: &str) -> UserType {
    if value.eq_ignore_ascii_case(UserType::Admin.as_str()) {
        UserType::Admin
    } else {
        UserType::Standard
    }
}
