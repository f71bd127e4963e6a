use instance_holder::prelude::*;

#[singleton]
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub name: String,
    pub port: u16,
}

#[singleton]
struct Unit;

#[singleton]
#[derive(Debug, PartialEq)]
enum Mode {
    Fast,
    Slow,
}

fn main() {
    Config::set_instance(Box::new(Config {
        name: String::from("app"),
        port: 8080,
    }));
    Unit::set_instance(Box::new(Unit));
    Mode::set_instance(Box::new(Mode::Slow));

    assert_eq!(Config::get_instance().port, 8080);
    assert!(Unit::is_set());
    assert_eq!(*Mode::get_instance(), Mode::Slow);
    assert_ne!(*Mode::get_instance(), Mode::Fast);
}
