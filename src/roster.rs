use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{Award, VerifiedRecord};

/// One roster entry as stored in the students file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub student_id: String,
    pub award: Award,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

/// The static student roster, loaded once at startup and never mutated.
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read roster {}: {}", path.display(), e))?;
        let students: Vec<Student> = serde_json::from_str(&raw)
            .map_err(|e| format!("invalid roster {}: {}", path.display(), e))?;
        Ok(Self { students })
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Look up a student by name (case-insensitive) and exact ID.
    pub fn find(&self, name: &str, student_id: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name) && s.student_id == student_id)
    }

    /// Identity match producing the record the engine trusts.
    ///
    /// Award and average come from the roster entry — a client-supplied
    /// award is never consulted.
    pub fn verify(&self, name: &str, student_id: &str) -> Option<VerifiedRecord> {
        self.find(name, student_id).map(|s| VerifiedRecord {
            name: s.name.clone(),
            student_id: s.student_id.clone(),
            award: s.award,
            gpa: s.gpa.clone(),
        })
    }
}
