use instance_holder::singleton;

#[singleton]
trait Source {
    fn value(&self) -> u32;
}

fn main() {}
