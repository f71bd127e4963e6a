use instance_holder::singleton;

#[singleton]
struct Wrapper<T>(T);

fn main() {}
