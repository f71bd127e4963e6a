use instance_holder::prelude::*;

#[singleton]
pub trait Source: Send + Sync {
    fn value(&self) -> u32;
}

#[singleton]
trait Marker: Send + Sync + 'static {}

#[singleton]
pub(crate) trait Bounded
where
    Self: Send + Sync,
{
    fn bounded(&self) -> bool {
        true
    }
}

struct Fixed;

impl Source for Fixed {
    fn value(&self) -> u32 {
        1
    }
}

impl Marker for Fixed {}

impl Bounded for Fixed {}

fn main() {
    <dyn Source>::set_instance(Box::new(Fixed));
    <dyn Marker>::set_instance(Box::new(Fixed));
    <dyn Bounded>::set_instance(Box::new(Fixed));

    assert_eq!(<dyn Source>::get_instance().value(), 1);
    assert!(<dyn Marker>::is_set());
    assert!(<dyn Bounded>::get_instance().bounded());
}
