// note: this example assumes you've analyzed the previous ones

use bindery::container::{Container, ContainerConfig};
use bindery::definition::Registration;
use std::sync::Arc;

struct EventBus;

impl EventBus {
    fn publish(&self, event: &str) {
        println!("published: {event}");
    }
}

// an application root holding shared infrastructure
struct App {
    bus: Arc<EventBus>,
}

fn main() {
    // a singleton default keeps the app (and everything wrapped out of it)
    // constructed once
    let mut container = Container::with_config(ContainerConfig { singleton: true });

    container
        .register(Registration::constructor("app", |_| {
            Ok(App {
                bus: Arc::new(EventBus),
            })
        }))
        .unwrap()
        // a member wrap resolves "app" first, then hands its bus out as a
        // dependency in its own right
        .register(Registration::wrap_member("bus", "app", |app: &App| {
            app.bus.clone()
        }))
        .unwrap()
        // a value wrap registers an opaque literal under a name
        .register(Registration::wrap_value("motd", "wrapped values resolve as-is"))
        .unwrap();

    let bus = container.resolve_typed::<Arc<EventBus>, _>("bus").unwrap();
    bus.publish("resolved through a wrap");

    let motd = container.resolve_typed::<&str, _>("motd").unwrap();
    println!("{motd}");
}
