//! Manuscript Context - Value Objects

use serde::{Deserialize, Serialize};

/// 手稿文件显示名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileName(String);

impl FileName {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("文件名不能为空");
        }
        if name.len() > 255 {
            return Err("文件名长度不能超过255字节");
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_accepts_cyrillic() {
        let name = FileName::new("книга.txt").unwrap();
        assert_eq!(name.as_str(), "книга.txt");
    }

    #[test]
    fn test_file_name_rejects_blank() {
        assert!(FileName::new("").is_err());
        assert!(FileName::new("   ").is_err());
    }
}
