use validator::ValidationErrors;

/// Returns the message of the first failing field, following `field_order`.
///
/// `ValidationErrors` keeps fields in a hash map, so the declared order has to
/// be supplied to make "first" deterministic. Fields missing from
/// `field_order` are considered after the listed ones.
pub fn first_validation_message(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let by_field = errors.field_errors();

    let ordered = field_order.iter().filter_map(|field| by_field.get(*field));
    let mut remaining: Vec<_> = by_field
        .iter()
        .filter(|(field, _)| !field_order.iter().any(|f| *f == AsRef::<str>::as_ref(*field)))
        .collect();
    remaining.sort_by(|a, b| a.0.cmp(b.0));

    ordered
        .chain(remaining.into_iter().map(|(_, errs)| errs))
        .flat_map(|errs| errs.iter())
        .map(|e| match &e.message {
            Some(message) => message.to_string(),
            None => e.code.to_string(),
        })
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}

/// Joins every field message, for logs.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
