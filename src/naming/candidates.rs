/// Generate the ordered list of `name.ext` candidates to probe within a directory.
///
/// Base names form the outer loop and extensions the inner one, so every extension of the
/// first base name is tried before moving on to the next base name. The order of the
/// returned list is the tie-break when several candidates exist on disk.
pub fn generate_candidate_names<B, E>(base_names: &[B], extensions: &[E]) -> Vec<String>
where
    B: AsRef<str>,
    E: AsRef<str>,
{
    base_names
        .iter()
        .flat_map(|base| {
            extensions
                .iter()
                .map(move |ext| format!("{}.{}", base.as_ref(), ext.as_ref()))
        })
        .collect()
}

/// Returns `true` when `name` ends in `.<ext>` for one of the provided extensions.
pub fn has_template_extension<E: AsRef<str>>(name: &str, extensions: &[E]) -> bool {
    extensions.iter().any(|ext| {
        name.strip_suffix(ext.as_ref())
            .is_some_and(|rest| rest.ends_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::{generate_candidate_names, has_template_extension};

    #[test]
    fn cycles_extensions_fastest() {
        let candidates = generate_candidate_names(&["index", "home"], &["tri", "html"]);
        assert_eq!(candidates, vec![
            "index.tri".to_string(),
            "index.html".to_string(),
            "home.tri".to_string(),
            "home.html".to_string(),
        ]);
    }

    #[test]
    fn empty_inputs_produce_no_candidates() {
        let no_bases: [&str; 0] = [];
        let no_exts: [&str; 0] = [];
        assert!(generate_candidate_names(&no_bases, &["tri"]).is_empty());
        assert!(generate_candidate_names(&["index"], &no_exts).is_empty());
    }

    #[test]
    fn recognises_template_extensions() {
        let extensions = ["tri", "html"];
        assert!(has_template_extension("one_fr.html", &extensions));
        assert!(has_template_extension("index.tri", &extensions));
        assert!(!has_template_extension("index.json", &extensions));
        assert!(!has_template_extension("index.xhtml", &extensions));
        assert!(!has_template_extension("tri", &extensions));
    }
}
