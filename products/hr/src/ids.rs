use uuid::Uuid;

const CANONICAL_LEN: usize = 36;

/// Decodes an external employee id. Only the hyphenated 8-4-4-4-12 form is
/// accepted; anything else yields `None`.
pub fn parse_employee_id(raw: &str) -> Option<Uuid> {
    if raw.len() != CANONICAL_LEN {
        return None;
    }
    Uuid::try_parse(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_form() {
        let id = Uuid::new_v4();
        assert_eq!(parse_employee_id(&id.to_string()), Some(id));
        assert_eq!(
            parse_employee_id(&id.hyphenated().to_string().to_uppercase()),
            Some(id)
        );
    }

    #[test]
    fn rejects_other_encodings() {
        let id = Uuid::new_v4();
        assert_eq!(parse_employee_id(&id.simple().to_string()), None);
        assert_eq!(parse_employee_id(&id.braced().to_string()), None);
        assert_eq!(parse_employee_id(&id.urn().to_string()), None);
        assert_eq!(parse_employee_id(&format!(" {id}")), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_employee_id(""), None);
        assert_eq!(parse_employee_id("invalid-uuid"), None);
        assert_eq!(
            parse_employee_id("zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz"),
            None
        );
    }
}
