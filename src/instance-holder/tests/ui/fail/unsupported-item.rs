use instance_holder::singleton;

#[singleton]
fn answer() -> u32 {
    42
}

fn main() {}
