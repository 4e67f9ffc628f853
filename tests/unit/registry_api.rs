use dtr_cli::registry::{Registry, TicketInput};

#[derive(Debug, Clone, PartialEq)]
struct Theme {
    name: &'static str,
    dark: bool,
}

#[test]
fn test_registry_with_struct_values() {
    let mut themes: Registry<Theme> = Registry::new();
    themes.register(TicketInput::with_id("light", Theme { name: "Light", dark: false }));
    themes.register(TicketInput::with_id("dark", Theme { name: "Dark", dark: true }));
    themes.register(TicketInput::with_id("midnight", Theme { name: "Dark", dark: true }));

    assert_eq!(themes.size(), 3);
    assert_eq!(themes.browse(&Theme { name: "Dark", dark: true }), Some(vec!["dark".to_string(), "midnight".to_string()]));
    assert_eq!(themes.browse(&Theme { name: "Sepia", dark: false }), None);
}

#[test]
fn test_upsert_keeps_index() {
    let mut registry: Registry<i32> = Registry::new();
    registry.register(TicketInput::with_id("a", 1));
    registry.register(TicketInput::with_id("b", 2));

    let ticket = registry.upsert("a", 100);
    assert_eq!(ticket.index, 0);
    assert_eq!(registry.values().copied().collect::<Vec<_>>(), [100, 2]);

    let ticket = registry.upsert("c", 3);
    assert_eq!(ticket.index, 2);
}

#[test]
fn test_generated_ids_are_unique() {
    let mut registry: Registry<i32> = Registry::new();
    let first = registry.register(7);
    let second = registry.register(7);

    assert_ne!(first.id, second.id);
    assert_eq!(registry.browse(&7).map(|ids| ids.len()), Some(2));
}

#[test]
fn test_lookup_out_of_range() {
    let mut registry: Registry<&str> = Registry::new();
    registry.onboard([TicketInput::with_id("only", "x")]);

    assert_eq!(registry.lookup(0), Some("only"));
    assert_eq!(registry.lookup(1), None);
    assert_eq!(registry.lookup(usize::MAX), None);
}
