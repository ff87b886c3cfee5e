//! Auth Model
//!
//! Which screen is showing and the state of the login/register form.

use super::types::TextInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Email,
    Password,
}

#[derive(Clone, Debug)]
pub struct LoginForm {
    pub mode: AuthMode,
    pub username: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    pub focus: LoginField,
    pub error: Option<String>,
    /// Informational banner (e.g. after the session expired)
    pub notice: Option<String>,
    pub submitting: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            username: TextInput::new(),
            email: TextInput::new(),
            password: TextInput::masked(),
            focus: LoginField::Email,
            error: None,
            notice: None,
            submitting: false,
        }
    }

    /// Fields shown in the current mode, top to bottom
    pub fn fields(&self) -> &'static [LoginField] {
        match self.mode {
            AuthMode::Login => &[LoginField::Email, LoginField::Password],
            AuthMode::Register => &[LoginField::Username, LoginField::Email, LoginField::Password],
        }
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    pub fn prev_field(&mut self) {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + fields.len() - 1) % fields.len()];
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.focus = self.fields()[0];
        self.error = None;
    }
}
