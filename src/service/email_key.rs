/// Rewrite an email into the key embedded in legacy upload URLs: every `.`
/// becomes `_`, domain included.
pub fn format_email_key(email: &str) -> String {
    email.replace('.', "_")
}
