// note: this example assumes you've analyzed the previous ones

use bindery::container::Container;
use bindery::definition::Registration;
use bindery::instance::{instance, FactoryPtr, InstancePtr};
use std::sync::Arc;

struct Worker {
    label: String,
}

fn main() {
    let mut container = Container::new();

    // aspects decorate factories of future registrations declaring the
    // matching attribute; multiple aspects under one tag wrap in
    // registration order
    container.register_aspect("announced", |factory: FactoryPtr| {
        Arc::new(move |dependencies: &[InstancePtr]| {
            println!("constructing an announced dependency...");

            let inner = factory(dependencies)?;
            let label = inner
                .downcast_ref::<Worker>()
                .map(|worker| worker.label.clone())
                .unwrap_or_default();

            Ok(instance(Worker {
                label: format!("[{label}]"),
            }))
        }) as FactoryPtr
    });

    container
        .register(
            Registration::constructor("worker", |_| {
                Ok(Worker {
                    label: "worker".to_string(),
                })
            })
            .with_attribute("announced"),
        )
        .unwrap()
        // no attribute declared, so no decoration happens here
        .register(Registration::constructor("plain", |_| {
            Ok(Worker {
                label: "plain".to_string(),
            })
        }))
        .unwrap();

    let worker = container.resolve_typed::<Worker, _>("worker").unwrap();
    let plain = container.resolve_typed::<Worker, _>("plain").unwrap();

    println!("decorated label: {}", worker.label);
    println!("plain label: {}", plain.label);
}
