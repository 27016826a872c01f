// note: this example assumes you've analyzed the previous one

use bindery::container::Container;
use bindery::definition::{CategoryFormat, Query, Registration};
use bindery::instance::InstancePtr;
use fxhash::FxHashMap;

trait Handler {
    fn describe(&self) -> String;
}

struct PingHandler;

impl Handler for PingHandler {
    fn describe(&self) -> String {
        "ping".to_string()
    }
}

struct EchoHandler;

impl Handler for EchoHandler {
    fn describe(&self) -> String {
        "echo".to_string()
    }
}

fn main() {
    let mut container = Container::new();

    // categories group names for bulk resolution; a definition can join any
    // number of them
    container
        .register(Registration::constructor("ping", |_| Ok(PingHandler)).in_category("handlers"))
        .unwrap()
        .register(Registration::constructor("echo", |_| Ok(EchoHandler)).in_category("handlers"))
        .unwrap();

    // the default format is an ordered sequence, in registration order
    let handlers = container
        .resolve_typed::<Vec<InstancePtr>, _>(Query::category("handlers"))
        .unwrap();

    for handler in handlers.iter() {
        if let Some(handler) = handler.downcast_ref::<PingHandler>() {
            println!("resolved {}", handler.describe());
        } else if let Some(handler) = handler.downcast_ref::<EchoHandler>() {
            println!("resolved {}", handler.describe());
        }
    }

    // the literal format maps each registered name to its resolved instance
    let by_name = container
        .resolve_typed::<FxHashMap<String, InstancePtr>, _>(
            Query::category("handlers").with_format(CategoryFormat::Literal),
        )
        .unwrap();

    println!("resolved {} handlers by name", by_name.len());
}
