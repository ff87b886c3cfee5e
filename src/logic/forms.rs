//! Form field validation
//!
//! Each validator returns the cleaned value or the message shown inline in
//! the form.

pub fn validate_folder_name(name: &str) -> Result<String, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Folder name is required");
    }
    Ok(name.to_string())
}

pub fn validate_image_name(name: &str) -> Result<String, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Image name is required");
    }
    Ok(name.to_string())
}

/// Returns (email, password)
pub fn validate_login(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required");
    }
    if password.is_empty() {
        return Err("Password is required");
    }
    Ok((email.to_string(), password.to_string()))
}

/// Returns (username, email, password)
pub fn validate_register(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(String, String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Username is required");
    }
    let (email, password) = validate_login(email, password)?;
    Ok((username.to_string(), email, password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_name_trimmed() {
        assert_eq!(validate_folder_name("  Work "), Ok("Work".to_string()));
        assert_eq!(validate_folder_name("   "), Err("Folder name is required"));
    }

    #[test]
    fn test_image_name_required() {
        assert_eq!(validate_image_name(""), Err("Image name is required"));
        assert_eq!(validate_image_name(" cat "), Ok("cat".to_string()));
    }

    #[test]
    fn test_login_keeps_password_verbatim() {
        assert_eq!(
            validate_login(" a@b.c ", " pw "),
            Ok(("a@b.c".to_string(), " pw ".to_string()))
        );
        assert_eq!(validate_login("", "pw"), Err("Email is required"));
        assert_eq!(validate_login("a@b.c", ""), Err("Password is required"));
    }

    #[test]
    fn test_register_requires_username() {
        assert_eq!(validate_register(" ", "a@b.c", "pw"), Err("Username is required"));
        assert!(validate_register("ana", "a@b.c", "pw").is_ok());
    }
}
