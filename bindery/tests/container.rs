use bindery::container::{Container, ContainerConfig};
use bindery::definition::{CategoryFormat, Query, Registration};
use bindery::instance::{instance, Empty, InstancePtr};
use fxhash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Mine {
    a: String,
    b: String,
}

struct Theirs {
    mine: InstancePtr,
}

struct Other {
    theirs: InstancePtr,
    arr: InstancePtr,
}

struct Counting {
    value: usize,
}

fn build_container() -> Container {
    let constructions = Arc::new(AtomicUsize::new(0));

    let mut container = Container::new();
    container
        .register(Registration::value("a", "a value"))
        .unwrap()
        .register(Registration::value("b", "b value"))
        .unwrap()
        .register(Registration::sequence("c", ["d", "e", "f"].map(instance)))
        .unwrap()
        .register(
            Registration::constructor("Mine", |dependencies| {
                Ok(Mine {
                    a: dependencies[0].downcast_ref::<&str>().unwrap().to_string(),
                    b: dependencies[1].downcast_ref::<&str>().unwrap().to_string(),
                })
            })
            .with_dependencies(["a", "b"]),
        )
        .unwrap()
        .register(
            Registration::constructor("Theirs", |dependencies| {
                Ok(Theirs {
                    mine: dependencies[0].clone(),
                })
            })
            .with_dependencies(["Mine"]),
        )
        .unwrap()
        .register(
            Registration::constructor("Other", |dependencies| {
                Ok(Other {
                    theirs: dependencies[0].clone(),
                    arr: dependencies[1].clone(),
                })
            })
            .with_dependencies(["Theirs", "c"]),
        )
        .unwrap()
        .register(
            Registration::constructor("Singleton", move |_| {
                Ok(Counting {
                    value: constructions.fetch_add(1, Ordering::SeqCst) + 1,
                })
            })
            .singleton(true),
        )
        .unwrap()
        .register(Registration::empty("empty"))
        .unwrap()
        .register(
            Registration::constructor("Theirs2", |dependencies| {
                Ok(Theirs {
                    mine: dependencies[0].clone(),
                })
            })
            .with_dependencies(["empty"]),
        )
        .unwrap();

    container
}

#[test]
fn should_configure_default_singleton_policy() {
    let mut container = Container::with_config(ContainerConfig { singleton: true });
    container
        .register(Registration::constructor("Mine", |_| {
            Ok(Mine {
                a: String::new(),
                b: String::new(),
            })
        }))
        .unwrap();

    assert!(container.definition("Mine").unwrap().singleton);

    let mut container = Container::with_config(ContainerConfig { singleton: false });
    container
        .register(Registration::constructor("Mine2", |_| {
            Ok(Mine {
                a: String::new(),
                b: String::new(),
            })
        }))
        .unwrap();

    assert!(!container.definition("Mine2").unwrap().singleton);
}

#[test]
fn should_resolve_string_values() {
    let mut container = build_container();

    let a = container.resolve_typed::<&str, _>("a").unwrap();
    assert_eq!(*a, "a value");

    let b = container.resolve_typed::<&str, _>("b").unwrap();
    assert_eq!(*b, "b value");
}

#[test]
fn should_resolve_sequences_in_order() {
    let mut container = build_container();

    let c = container.resolve_typed::<Vec<InstancePtr>, _>("c").unwrap();
    assert_eq!(c.len(), 3);

    let elements: Vec<&str> = c
        .iter()
        .map(|element| *element.downcast_ref::<&str>().unwrap())
        .collect();
    assert_eq!(elements, ["d", "e", "f"]);

    // sequences are shared, not rebuilt per call
    let again = container.resolve_typed::<Vec<InstancePtr>, _>("c").unwrap();
    assert!(Arc::ptr_eq(&c, &again));
}

#[test]
fn should_resolve_constructor_with_value_dependencies() {
    let mut container = build_container();

    let mine = container.resolve_typed::<Mine, _>("Mine").unwrap();
    assert_eq!(mine.a, "a value");
    assert_eq!(mine.b, "b value");
}

#[test]
fn should_resolve_constructor_with_constructed_dependency() {
    let mut container = build_container();

    let theirs = container.resolve_typed::<Theirs, _>("Theirs").unwrap();
    let mine = theirs.mine.downcast_ref::<Mine>().unwrap();
    assert_eq!(mine.a, "a value");
    assert_eq!(mine.b, "b value");
}

#[test]
fn should_resolve_constructor_with_mixed_dependencies() {
    let mut container = build_container();

    let other = container.resolve_typed::<Other, _>("Other").unwrap();

    let theirs = other.theirs.downcast_ref::<Theirs>().unwrap();
    let mine = theirs.mine.downcast_ref::<Mine>().unwrap();
    assert_eq!(mine.a, "a value");

    let arr = other.arr.downcast_ref::<Vec<InstancePtr>>().unwrap();
    assert_eq!(arr.len(), 3);
}

#[test]
fn should_create_only_one_copy_of_a_singleton() {
    let mut container = build_container();

    let first = container.resolve_typed::<Counting, _>("Singleton").unwrap();
    assert_eq!(first.value, 1);

    let second = container.resolve_typed::<Counting, _>("Singleton").unwrap();
    assert_eq!(second.value, 1);

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn should_resolve_empty_definitions() {
    let mut container = build_container();

    assert!(container.resolve("empty").unwrap().is::<Empty>());
}

#[test]
fn should_pass_empty_markers_as_dependencies() {
    let mut container = build_container();

    let theirs = container.resolve_typed::<Theirs, _>("Theirs2").unwrap();
    assert!(theirs.mine.is::<Empty>());
}

mod wrapping {
    use super::*;

    struct Bus;

    impl Bus {
        fn on(&self) -> &'static str {
            "on called"
        }
    }

    struct App {
        bus: Arc<Bus>,
    }

    fn build_container() -> Container {
        let mut container = Container::with_config(ContainerConfig { singleton: true });
        container
            .register(Registration::constructor("app", |_| {
                Ok(App {
                    bus: Arc::new(Bus),
                })
            }))
            .unwrap();

        container
    }

    #[test]
    fn should_resolve_member_of_configured_instance() {
        let mut container = build_container();
        container
            .register(Registration::wrap_member("bus", "app", |app: &App| {
                app.bus.clone()
            }))
            .unwrap();

        let bus = container.resolve_typed::<Arc<Bus>, _>("bus").unwrap();
        assert_eq!(bus.on(), "on called");

        // the wrapped member is the exact member of the resolved context
        let app = container.resolve_typed::<App, _>("app").unwrap();
        assert!(Arc::ptr_eq(&app.bus, &bus));
    }

    #[test]
    fn should_resolve_wrapped_literal() {
        struct Module {
            value: &'static str,
        }

        let mut container = build_container();
        container
            .register(Registration::wrap_value(
                "$",
                Module {
                    value: "Goes here",
                },
            ))
            .unwrap();

        let module = container.resolve_typed::<Module, _>("$").unwrap();
        assert_eq!(module.value, "Goes here");
    }

    #[test]
    fn should_resolve_wrapped_literal_through_category() {
        struct Module;

        let mut container = build_container();
        container
            .register(Registration::wrap_value("typeo", Module).in_category("stuff"))
            .unwrap();

        let stuff = container
            .resolve_typed::<Vec<InstancePtr>, _>(Query::category("stuff"))
            .unwrap();
        assert_eq!(stuff.len(), 1);
        assert!(stuff[0].is::<Module>());
    }
}

mod categories {
    use super::*;

    fn register_mine(container: &mut Container) {
        container
            .register(
                Registration::constructor("Mine", |_| {
                    Ok(Mine {
                        a: String::new(),
                        b: String::new(),
                    })
                })
                .in_category("taco"),
            )
            .unwrap();
    }

    fn register_theirs(container: &mut Container) {
        container
            .register(
                Registration::constructor("Theirs", |_| {
                    Ok(Theirs {
                        mine: instance(Empty),
                    })
                })
                .in_category("taco"),
            )
            .unwrap();
    }

    #[test]
    fn should_record_category_membership() {
        let mut container = Container::new();
        register_mine(&mut container);

        assert!(container.is_category_registered("taco"));
    }

    #[test]
    fn should_resolve_single_member_category() {
        let mut container = Container::new();
        register_mine(&mut container);

        let items = container
            .resolve_typed::<Vec<InstancePtr>, _>(Query::category("taco"))
            .unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].is::<Mine>());
    }

    #[test]
    fn should_format_category_as_array() {
        let mut container = Container::new();
        register_mine(&mut container);
        register_theirs(&mut container);

        let items = container
            .resolve_typed::<Vec<InstancePtr>, _>(
                Query::category("taco").with_format(CategoryFormat::Array),
            )
            .unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].is::<Mine>());
        assert!(items[1].is::<Theirs>());
    }

    #[test]
    fn should_format_category_as_literal() {
        let mut container = Container::new();
        register_mine(&mut container);
        register_theirs(&mut container);

        let items = container
            .resolve_typed::<FxHashMap<String, InstancePtr>, _>(
                Query::category("taco").with_format(CategoryFormat::Literal),
            )
            .unwrap();
        assert_eq!(items.len(), 2);
        assert!(items["Mine"].is::<Mine>());
        assert!(items["Theirs"].is::<Theirs>());
    }
}
