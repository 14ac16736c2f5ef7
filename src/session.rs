/// Who is using the console.
///
/// There is no credential store: any non-empty email and password pair logs
/// in. One session exists per process, created at start-up and changed only
/// through [`Session::login`] and [`Session::logout`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn {
        email: String,
    },
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs in when both values are non-empty. Returns whether it did.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        if email.is_empty() || password.is_empty() {
            return false;
        }

        *self = Session::LoggedIn {
            email: email.to_string(),
        };
        true
    }

    pub fn logout(&mut self) {
        *self = Session::LoggedOut;
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    /// Email of the logged-in user, empty when logged out.
    pub fn user_email(&self) -> &str {
        match self {
            Session::LoggedIn { email } => email,
            Session::LoggedOut => "",
        }
    }
}
