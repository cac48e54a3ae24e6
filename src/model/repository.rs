use crate::model::result::VelocityError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

// New
impl Repository {
    pub fn new(owner: impl ToString, name: impl ToString) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }
}

// Parser
impl FromStr for Repository {
    type Err = VelocityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((owner, name)) = s.split_once('/') else {
            return Err(VelocityError::InvalidRepository(s.to_string()));
        };
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(VelocityError::InvalidRepository(s.to_string()));
        }
        Ok(Self::new(owner, name))
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
