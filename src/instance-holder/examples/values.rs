use std::error::Error;

use instance_holder::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    // Process-wide access through the type itself.
    <dyn ValueSource>::set_instance(Box::new(Constant));
    println!("constant: {}", <dyn ValueSource>::get_instance().get_value());

    <dyn ValueSource>::set_instance(Box::new(Parameterized::new(2)));
    println!("parameterized: {}", <dyn ValueSource>::get_instance().get_value());

    // An explicit context owned by the composition root.
    let context = HolderContext::init(AppModule::new(3)).unwrap();
    let reporter = Reporter::new(&context);
    reporter.report();

    context.set_instance::<dyn ValueSource>(Box::new(Constant));
    reporter.report();
}

#[singleton]
trait ValueSource: Send + Sync {
    fn get_value(&self) -> u32;
}

struct Constant;

impl ValueSource for Constant {
    fn get_value(&self) -> u32 {
        1
    }
}

struct Parameterized {
    value: u32,
}

impl Parameterized {
    fn new(value: u32) -> Self {
        Self { value }
    }
}

impl ValueSource for Parameterized {
    fn get_value(&self) -> u32 {
        self.value
    }
}

struct AppModule {
    initial: u32,
}

impl AppModule {
    fn new(initial: u32) -> Self {
        Self { initial }
    }
}

impl Module for AppModule {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        configurer.install::<dyn ValueSource>(Box::new(Parameterized::new(self.initial)));
        configurer.install::<str>(Box::from("values"));
        Ok(())
    }
}

struct Reporter<'a> {
    context: &'a HolderContext,
}

impl<'a> Reporter<'a> {
    fn new(context: &'a HolderContext) -> Self {
        Self { context }
    }

    fn report(&self) {
        let name = self.context.get_instance::<str>();
        let source = self.context.get_instance::<dyn ValueSource>();
        println!("[{name}] context value: {}", source.get_value());
    }
}
