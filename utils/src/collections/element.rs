use std::fmt::Debug;

pub trait Element: Debug + Send + 'static {}

impl Element for i32 {}

impl Element for usize {}

impl Element for String {}

impl<T: Element, E: Element> Element for Result<T, E> {}
