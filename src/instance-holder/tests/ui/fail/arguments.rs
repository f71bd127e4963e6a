use instance_holder::singleton;

#[singleton(global)]
struct Config;

fn main() {}
