use bindery::container::Container;
use bindery::definition::Registration;

// this is a service we would like the container to construct for us
struct MessageService {
    recipient: String,
}

impl MessageService {
    fn message(&self) -> String {
        format!("Hello {}!", self.recipient)
    }
}

//noinspection DuplicatedCode
// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    let mut container = Container::new();

    container
        // literal values are stored and later returned verbatim
        .register(Registration::value("recipient", "world"))
        .unwrap()
        // constructors receive their resolved dependencies in declared order
        .register(
            Registration::constructor("service", |dependencies| {
                Ok(MessageService {
                    recipient: dependencies[0].downcast_ref::<&str>().unwrap().to_string(),
                })
            })
            .with_dependencies(["recipient"]),
        )
        .unwrap();

    // resolving constructs the whole dependency graph; the typed front
    // downcasts the result to the registered concrete type
    let service = container
        .resolve_typed::<MessageService, _>("service")
        .unwrap();

    println!("{}", service.message());
}
