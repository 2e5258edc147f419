use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lacquer_style::{
    primitive, style, styled, Attrs, Condition, NodeRef, Primitive, Props, RenderFrame,
    RenderHost, Style,
};
use lacquer_theme::{set_theme, theme, value, Platform, Theme, ThemeSnapshot, Value};

fn snapshot() -> ThemeSnapshot {
    ThemeSnapshot::new(Theme::new(), 0)
}

#[test]
fn later_rules_override_earlier_ones_on_key_collision() {
    let button = styled(primitive("view"))
        .style(style! { color: "red", padding: 4 })
        .when("active", style! { color: "blue" })
        .build();

    let snap = snapshot();

    let active = button.resolve_with(&snap, &Props::new().with("active", true), Platform::Ios);
    assert_eq!(active.style.get("color"), Some(&Value::from("blue")));
    assert_eq!(active.style.get("padding"), Some(&Value::Num(4.0)));

    let idle = button.resolve_with(&snap, &Props::new(), Platform::Ios);
    assert_eq!(idle.style.get("color"), Some(&Value::from("red")));
}

#[test]
fn conditional_and_unconditional_attrs_share_one_overwrite_chain() {
    let chip = styled(primitive("view"))
        .attrs(Attrs::new().set("role", "chip").set("tab-index", 0))
        .when("selected", Attrs::new().set("role", "option"))
        .build();

    let snap = snapshot();

    let selected = chip.resolve_with(&snap, &Props::new().with("selected", true), Platform::Ios);
    assert_eq!(selected.attrs.get("role"), Some(&Value::from("option")));
    assert_eq!(selected.attrs.get("tab-index"), Some(&Value::Num(0.0)));

    let plain = chip.resolve_with(&snap, &Props::new(), Platform::Ios);
    assert_eq!(plain.attrs.get("role"), Some(&Value::from("chip")));
}

#[test]
fn resolution_runs_at_most_once_per_context() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let card = styled(primitive("view"))
        .style_with(move |_ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
            style! { elevation: 2 }
        })
        .build();

    let snap = snapshot();
    let props = Props::new().with("variant", "primary");

    let first = card.resolve_with(&snap, &props, Platform::Ios);
    let second = card.resolve_with(&snap, &props, Platform::Ios);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));

    // A different allowlisted prop value is a different context.
    card.resolve_with(
        &snap,
        &Props::new().with("variant", "secondary"),
        Platform::Ios,
    );
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn theme_revision_rotates_the_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let card = styled(primitive("view"))
        .style_with(move |ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
            style! { color: (ctx.theme.str("rotation.color").unwrap_or("#000")) }
        })
        .build();

    let props = Props::new();
    let old = ThemeSnapshot::new(theme! { rotation: { color: "#111111" } }, 1);
    let new = ThemeSnapshot::new(theme! { rotation: { color: "#222222" } }, 2);

    assert_eq!(
        card.resolve_with(&old, &props, Platform::Ios).style.get("color"),
        Some(&Value::from("#111111"))
    );
    card.resolve_with(&old, &props, Platform::Ios);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // New revision: the first resolution misses and re-runs the rule.
    assert_eq!(
        card.resolve_with(&new, &props, Platform::Ios).style.get("color"),
        Some(&Value::from("#222222"))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn extended_builders_are_independent() {
    let base = styled(primitive("view")).style(style! { color: "red" });
    let extended = base.extend().style(style! { outline: "2px" });

    let original = base.build();
    let widened = extended.build();

    let snap = snapshot();
    let resolved = original.resolve_with(&snap, &Props::new(), Platform::Ios);
    assert!(resolved.style.get("outline").is_none());

    let resolved = widened.resolve_with(&snap, &Props::new(), Platform::Ios);
    assert_eq!(resolved.style.get("outline"), Some(&Value::from("2px")));
    assert_eq!(resolved.style.get("color"), Some(&Value::from("red")));
}

#[test]
fn platform_conditions_select_on_the_render_platform() {
    let bar = styled(primitive("view"))
        .style(style! { height: 44 })
        .when("android", style! { height: 56 })
        .build();

    let snap = snapshot();
    let props = Props::new();

    let ios = bar.resolve_with(&snap, &props, Platform::Ios);
    assert_eq!(ios.style.get("height"), Some(&Value::Num(44.0)));

    let android = bar.resolve_with(&snap, &props, Platform::Android);
    assert_eq!(android.style.get("height"), Some(&Value::Num(56.0)));
}

#[test]
fn empty_rule_lists_resolve_to_empty_output() {
    let bare = styled(primitive("view")).build();
    let resolved = bare.resolve_with(&snapshot(), &Props::new(), Platform::Ios);

    assert!(resolved.style.is_empty());
    assert!(resolved.attrs.is_empty());
    assert!(resolved.node_ref.is_none());

    // A triggered rule with an empty payload is a no-op contribution.
    let noop = styled(primitive("view"))
        .when(Condition::from(true), Attrs::new())
        .build();
    let resolved = noop.resolve_with(&snapshot(), &Props::new(), Platform::Ios);
    assert!(resolved.style.is_empty());
    assert!(resolved.attrs.is_empty());
}

#[test]
fn direct_props_override_rule_attrs_but_style_is_layered() {
    let field = styled(primitive("input"))
        .style(style! { color: "red" })
        .attrs(Attrs::new().set("role", "textbox").set("spellcheck", false))
        .build();

    let frame = field.frame_with(
        &snapshot(),
        Props::new()
            .with("role", "searchbox")
            .with_style(style! { color: "green" }),
        Platform::Ios,
    );

    // Direct props win over rule-derived attrs on key collision.
    assert_eq!(frame.attrs.get("role"), Some(&Value::from("searchbox")));
    assert_eq!(frame.attrs.get("spellcheck"), Some(&Value::Bool(false)));

    // Style is excluded from that spread: both layers survive, the direct
    // one winning visually when flattened.
    assert_eq!(frame.style.layers().len(), 2);
    assert_eq!(
        frame.style.flatten().get("color"),
        Some(&Value::from("green"))
    );
}

#[test]
fn rule_supplied_refs_replace_the_forwarded_ref() {
    let forwarded = NodeRef::new();
    let redirected = NodeRef::new();
    let inner = redirected.clone();

    let anchored = styled(primitive("view"))
        .when("active", Attrs::new().node_ref(inner))
        .build();

    let frame = anchored.frame_with(
        &snapshot(),
        Props::new()
            .with("active", true)
            .with_node_ref(forwarded.clone()),
        Platform::Ios,
    );
    assert!(NodeRef::same(frame.node_ref.as_ref().unwrap(), &redirected));

    // Untriggered: the forwarded ref flows through.
    let frame = anchored.frame_with(
        &snapshot(),
        Props::new().with_node_ref(forwarded.clone()),
        Platform::Ios,
    );
    assert!(NodeRef::same(frame.node_ref.as_ref().unwrap(), &forwarded));
}

#[test]
fn wrapper_clones_share_the_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let card = styled(primitive("view"))
        .style_with(move |_ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
            style! { padding: 8 }
        })
        .build();
    let twin = card.clone();

    let snap = snapshot();
    card.resolve_with(&snap, &Props::new(), Platform::Ios);
    twin.resolve_with(&snap, &Props::new(), Platform::Ios);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

struct RecordingHost {
    mounted: Vec<(String, RenderFrame)>,
}

impl RenderHost for RecordingHost {
    type Node = usize;

    fn mount(&mut self, primitive: &dyn Primitive, frame: RenderFrame) -> usize {
        self.mounted.push((primitive.tag().to_string(), frame));
        self.mounted.len() - 1
    }
}

#[test]
fn mounting_hands_the_host_the_base_primitive_and_frame() {
    let badge = styled(primitive("text"))
        .style(style! { fontSize: 12 })
        .build();

    let mut host = RecordingHost { mounted: Vec::new() };
    let node = badge.mount_in(&mut host, Props::new().with("label", "New"));

    assert_eq!(node, 0);
    let (tag, frame) = &host.mounted[0];
    assert_eq!(tag, "text");
    assert_eq!(frame.attrs.get("label"), Some(&Value::from("New")));
    assert_eq!(
        frame.style.flatten().get("fontSize"),
        Some(&Value::Num(12.0))
    );
}

#[test]
fn theme_updates_flow_into_fresh_resolutions() {
    // End to end against the global store: a theme-driven style picks up
    // the initial value, and a later update is observed by the very next
    // resolution because the revision rotates the cache.
    set_theme(value!({ e2e: { colors: { primary: "#007AFF" } } }));

    let button = styled(primitive("view"))
        .style_with(|ctx| {
            style! { color: (ctx.theme.str("e2e.colors.primary").unwrap_or("#000000")) }
        })
        .build();

    let resolved = button.resolve(&Props::new());
    assert_eq!(resolved.style.get("color"), Some(&Value::from("#007AFF")));

    set_theme(value!({ e2e: { colors: { primary: "#FF3B30" } } }));

    let resolved = button.resolve(&Props::new());
    assert_eq!(resolved.style.get("color"), Some(&Value::from("#FF3B30")));

    let style = Style::from_value(lacquer_theme::get_theme().get("e2e.colors"));
    assert_eq!(style.get("primary"), Some(&Value::from("#FF3B30")));
}
