use lucerna::Service;
use lucerna_logging::{LogLevel, Logger, LoggerOf};
use static_assertions::assert_impl_all;

use crate::fixtures::builder_with_backend;

mod injection;
mod resolution;

assert_impl_all!(Logger: Send, Sync, Clone);
assert_impl_all!(LoggerOf<std::rc::Rc<()>>: Send, Sync, Clone);

struct Ingestor {
    logger: Logger,
}

impl Service for Ingestor {}

#[test]
fn one_install_call_wires_the_whole_integration() {
    let (mut builder, chronicle) = builder_with_backend();
    builder
        .component::<Ingestor>()
        .param::<Logger>()
        .constructor(|args| {
            Ok(Ingestor {
                logger: args.owned::<Logger>()?,
            })
        });
    let container = builder.build().unwrap().container();

    let ingestor = container.get::<Ingestor>().unwrap();
    ingestor.logger.info("payload accepted");

    let records = chronicle.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Info);
    assert_eq!(records[0].category, std::any::type_name::<Ingestor>());
    assert_eq!(records[0].message, "payload accepted");
}
