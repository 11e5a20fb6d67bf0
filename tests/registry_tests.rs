use ambit::runtime::{Registry, run_program};
use ambit::syntax::{Directive, Scanner};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_point_back_into_the_directive_sequence() {
        let source = "SCOPE a { DECLARE b; }";
        let directives = Scanner::new(source).scan().unwrap();
        let mut registry = Registry::new();
        assert!(run_program(&directives, &mut registry).is_empty());

        let entity = registry.lookup("::a::b").unwrap();
        match &directives[entity.node] {
            Directive::Declare(decl) => assert_eq!(decl.path, "::a::b"),
            other => panic!("entity should point at its declaration, got {}", other),
        }

        let scope = registry.lookup("::a").unwrap();
        assert!(matches!(&directives[scope.node], Directive::Scope(_)));
    }

    #[test]
    fn lookup_is_exact_match_only() {
        let directives = Scanner::new("SCOPE a { DECLARE b; }").scan().unwrap();
        let mut registry = Registry::new();
        run_program(&directives, &mut registry);

        assert!(registry.lookup("::a::b").is_some());
        assert!(registry.lookup("b").is_none());
        assert!(registry.lookup("::b").is_none());
        assert!(registry.lookup("::a::b::").is_none());
    }

    #[test]
    fn drain_is_one_shot() {
        let directives = Scanner::new("DECLARE x;\nACCESS x;").scan().unwrap();
        let mut registry = Registry::new();
        run_program(&directives, &mut registry);

        let mut first = Vec::new();
        registry.drain(&mut first).unwrap();
        assert_eq!(String::from_utf8(first).unwrap(), "LINE 2 ACCESS ::x\n");

        let mut second = Vec::new();
        registry.drain(&mut second).unwrap();
        assert!(second.is_empty());
    }
}
