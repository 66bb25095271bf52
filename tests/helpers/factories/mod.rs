pub mod frame_factory;
pub mod request_factory;
pub mod response_factory;

pub use frame_factory::FrameFactory;
pub use request_factory::RequestFactory;
pub use response_factory::ResponseFactory;

#[cfg(test)]
mod frame_factory_test;
#[cfg(test)]
mod request_factory_test;
