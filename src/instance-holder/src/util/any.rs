use std::any::Any;
use std::sync::Arc;

pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>
    where
        Self: Send + Sync;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>
    where
        Self: Send + Sync,
    {
        self
    }
}

pub trait DowncastArc: Sized {
    fn downcast_arc<T>(self) -> Result<Arc<T>, Self>
    where
        T: Any + Send + Sync;
}

impl<S> DowncastArc for Arc<S>
where
    S: AsAny + Send + Sync + ?Sized,
{
    fn downcast_arc<T>(self) -> Result<Arc<T>, Self>
    where
        T: Any + Send + Sync,
    {
        if <S as AsAny>::as_any(&self).is::<T>() {
            let res = <S as AsAny>::into_any_arc(self)
                .downcast::<T>()
                .unwrap_or_else(|_| std::unreachable!("`self` should be `Arc<T>`"));
            Ok(res)
        } else {
            Err(self)
        }
    }
}
