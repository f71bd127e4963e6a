use instance_holder::singleton;

#[singleton]
trait Source: Send + Sync {
    type Item;

    fn next(&self) -> Self::Item;
}

fn main() {}
