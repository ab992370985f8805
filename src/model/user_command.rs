//! Domain models for admin-defined text commands.

/// A text command added at runtime by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCommand {
    pub name: String,
    pub description: String,
    pub response: String,
}

impl UserCommand {
    pub fn from_entity(entity: entity::user_command::Model) -> Self {
        Self {
            name: entity.name,
            description: entity.description,
            response: entity.response,
        }
    }
}

/// Changes requested by the edit command; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct EditUserCommandParam {
    pub new_name: Option<String>,
    pub new_description: Option<String>,
    pub new_response: Option<String>,
}

impl EditUserCommandParam {
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none() && self.new_description.is_none() && self.new_response.is_none()
    }
}
