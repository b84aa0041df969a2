use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use obfmap_resolve::{
    ClassMembers, ClassPair, MappingSnapshot, MemberDescriptor, Resolver, RESOLVE_TARGET,
};
use tracing::{field::Visit, Event, Level};
use tracing_subscriber::{layer::Context, prelude::*, Layer};

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct CapturingLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CapturingLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.events
            .lock()
            .expect("events mutex poisoned")
            .push(CapturedEvent {
                level: *event.metadata().level(),
                target: event.metadata().target().to_string(),
                fields: visitor.fields,
            });
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

/// Runs `f` with a thread-local subscriber and returns its result plus every event it logged.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
    let layer = CapturingLayer::default();
    let events = layer.events.clone();
    let subscriber = tracing_subscriber::registry().with(layer);
    let out = tracing::subscriber::with_default(subscriber, f);
    let events = events.lock().expect("events mutex poisoned").clone();
    (out, events)
}

pub fn warnings(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events
        .iter()
        .filter(|event| event.level == Level::WARN && event.target == RESOLVE_TARGET)
        .collect()
}

fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// `net.Foo <-> a`, `net/Bar <-> b`, with one aliased and one plain method and field on
/// `net/Foo`.
pub fn snapshot() -> MappingSnapshot {
    MappingSnapshot {
        classes: vec![
            ClassPair {
                human: "net.Foo".to_string(),
                runtime: "a".to_string(),
            },
            ClassPair {
                human: "net/Bar".to_string(),
                runtime: "b".to_string(),
            },
        ],
        methods: vec![
            ClassMembers {
                class_name: "net/Foo".to_string(),
                members: vec![
                    MemberDescriptor::method("doThing", "()V"),
                    MemberDescriptor::method("func_2_b", "(Lnet/Bar;)Lnet/Foo;"),
                ],
            },
            ClassMembers {
                class_name: "net/Unshipped".to_string(),
                members: vec![MemberDescriptor::method("func_3_c", "()V")],
            },
        ],
        fields: vec![ClassMembers {
            class_name: "net/Foo".to_string(),
            members: vec![
                MemberDescriptor::field("field_1_a"),
                MemberDescriptor::field("field_2_b"),
            ],
        }],
        method_aliases: map(&[("doThing", "run"), ("func_3_c", "gone")]),
        field_aliases: map(&[("field_1_a", "count")]),
        raw_methods: HashMap::from([(
            "a".to_string(),
            map(&[("b()V", "doThing()V"), ("c(Lb;)La;", "func_2_b(Lnet/Bar;)Lnet/Foo;")]),
        )]),
        raw_fields: HashMap::from([("a".to_string(), map(&[("d:I", "field_1_a:I")]))]),
    }
}

pub fn obfuscated() -> Resolver {
    Resolver::build(true, &snapshot()).expect("fixture snapshot builds")
}
