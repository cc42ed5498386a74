use crate::checks::{self, Registry};
use std::io::Write;

/// Write `name : description` for every check the group selectors match.
pub fn handle_list<W: Write>(
    registry: &Registry,
    groups: &[String],
    ignore_groups: &[String],
    out: &mut W,
) -> crate::Result<()> {
    for info in checks::list(registry, groups, ignore_groups)? {
        writeln!(out, "{} : {}", info.name, info.description)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(groups: &[&str], ignore_groups: &[&str]) -> String {
        let registry = Registry::with_builtin().unwrap();
        let groups: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
        let ignore: Vec<String> = ignore_groups.iter().map(|g| g.to_string()).collect();
        let mut out = Vec::new();
        handle_list(&registry, &groups, &ignore, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_lists_every_builtin() {
        assert_eq!(
            listed(&[], &[]),
            "fully-qualified-image : Checks if containers have fully qualified image names\n\
             unused-secret : Checks if there are unused secrets in the cluster. Ignores service account tokens\n"
        );
    }

    #[test]
    fn test_excluded_group_lists_nothing() {
        assert_eq!(listed(&[], &["basic"]), "");
    }
}
