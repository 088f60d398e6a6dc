#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitStatus {
    Editing,
    Submitting,
    Sent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactError {
    Missing(ContactField),
    InvalidEmail,
    AlreadySubmitting,
}

impl ContactError {
    pub fn message(self) -> String {
        match self {
            Self::Missing(field) => format!("{} is required.", field.label()),
            Self::InvalidEmail => "Please enter a valid email address.".to_string(),
            Self::AlreadySubmitting => "Your message is already on its way.".to_string(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing(_) => "missing_field",
            Self::InvalidEmail => "invalid_email",
            Self::AlreadySubmitting => "already_submitting",
        }
    }
}

/// Contact form state. Submission is simulated: nothing leaves the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: SubmitStatus,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            subject: String::new(),
            message: String::new(),
            status: SubmitStatus::Editing,
        }
    }
}

impl ContactForm {
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn update(&mut self, field: ContactField, value: String) {
        if self.status == SubmitStatus::Submitting {
            return;
        }

        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Subject => self.subject = value,
            ContactField::Message => self.message = value,
        }
        self.status = SubmitStatus::Editing;
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        for field in [
            ContactField::Name,
            ContactField::Email,
            ContactField::Subject,
            ContactField::Message,
        ] {
            if self.value(field).trim().is_empty() {
                return Err(ContactError::Missing(field));
            }
        }

        if !is_plausible_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(())
    }

    pub fn begin_submit(&mut self) -> Result<(), ContactError> {
        if self.status == SubmitStatus::Submitting {
            return Err(ContactError::AlreadySubmitting);
        }

        self.validate()?;
        self.status = SubmitStatus::Submitting;
        Ok(())
    }

    pub fn complete_submit(&mut self) {
        *self = Self {
            status: SubmitStatus::Sent,
            ..Self::default()
        };
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}
