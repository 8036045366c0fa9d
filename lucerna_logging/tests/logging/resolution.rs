//! Tests for resolving loggers directly: the on-demand registration source.
use std::any::type_name;
use std::sync::Arc;

use lucerna::{ConstructionError, ResolveError, TypeInfo};
use lucerna_logging::{Logger, LoggerError, LoggerOf};

use crate::fixtures::{Chronicle, builder_with_backend, builder_without_backend};

struct Article;
struct Payment;

#[test]
fn untyped_loggers_resolve_to_the_root_category() {
    let (builder, chronicle) = builder_with_backend();
    let container = builder.build().unwrap().container();

    let logger = container.get::<Logger>().unwrap();

    assert_eq!(logger.category(), "");
    assert_eq!(chronicle.created_categories(), vec![""]);
}

#[test]
fn typed_loggers_are_named_after_their_type_argument() {
    let (builder, chronicle) = builder_with_backend();
    let container = builder.build().unwrap().container();

    let article_logger = container.get::<LoggerOf<Article>>().unwrap();
    let payment_logger = container.get::<LoggerOf<Payment>>().unwrap();

    assert_eq!(article_logger.category(), type_name::<Article>());
    assert_eq!(payment_logger.category(), type_name::<Payment>());
    assert_eq!(
        chronicle.created_categories(),
        vec![type_name::<Article>(), type_name::<Payment>()]
    );

    assert_eq!(LoggerOf::<Article>::target(), TypeInfo::of::<Article>());
    let unwrapped = (*article_logger).clone().into_inner();
    assert_eq!(unwrapped.category(), type_name::<Article>());
}

#[test]
fn loggers_are_shared_within_a_scope_but_not_across() {
    let (builder, chronicle) = builder_with_backend();
    let container = builder.build().unwrap().container();

    let first = container.get::<LoggerOf<Article>>().unwrap();
    let second = container.get::<LoggerOf<Article>>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let child = container.scope();
    let third = child.get::<LoggerOf<Article>>().unwrap();
    assert!(!Arc::ptr_eq(&first, &third));

    // One logger per scope that asked, not one per request.
    assert_eq!(chronicle.created_categories().len(), 2);
}

#[test]
fn explicit_registrations_shadow_synthesized_loggers() {
    let (mut builder, chronicle) = builder_with_backend();
    let sink = Arc::new(Chronicle::default());
    builder.instance(Logger::new("hand-rolled", sink));
    let container = builder.build().unwrap().container();

    let logger = container.get::<Logger>().unwrap();
    assert_eq!(logger.category(), "hand-rolled");
    // The backend never saw the request.
    assert!(chronicle.created_categories().is_empty());

    // Typed requests still go through the source.
    let typed = container.get::<LoggerOf<Article>>().unwrap();
    assert_eq!(typed.category(), type_name::<Article>());
}

#[test]
fn a_logger_for_the_logger_type_is_never_synthesized() {
    let (builder, _chronicle) = builder_with_backend();
    let container = builder.build().unwrap().container();

    let error = container.get::<LoggerOf<Logger>>().unwrap_err();
    let ResolveError::NotRegistered { key } = &error else {
        panic!("expected a `NotRegistered` error, got: {error}");
    };
    assert!(key.is::<LoggerOf<Logger>>());
}

#[test]
fn a_missing_backend_fails_the_resolution_that_needed_the_logger() {
    let builder = builder_without_backend();
    let container = builder.build().unwrap().container();

    let error = container.get::<Logger>().unwrap_err();
    let ResolveError::Construction(ConstructionError::Synthesized { source, .. }) = &error else {
        panic!("expected a construction error, got: {error}");
    };
    let logger_error = source.downcast_ref::<LoggerError>().unwrap();
    insta::assert_snapshot!(
        logger_error,
        @"No `LoggerFactory` is registered: the logger for category ``, needed by `lucerna_logging::logger::Logger`, cannot be created. Register a logging backend (e.g. by installing a backend extension) before building the registry."
    );
}

#[test]
fn the_missing_backend_error_names_the_category_that_was_asked_for() {
    let builder = builder_without_backend();
    let container = builder.build().unwrap().container();

    let error = container.get::<LoggerOf<Article>>().unwrap_err();
    let ResolveError::Construction(ConstructionError::Synthesized { source, .. }) = &error else {
        panic!("expected a construction error, got: {error}");
    };
    let Some(LoggerError::MissingBackend {
        category,
        requester,
        ..
    }) = source.downcast_ref::<LoggerError>()
    else {
        panic!("expected a missing backend error");
    };
    assert_eq!(category, type_name::<Article>());
    assert!(requester.is::<LoggerOf<Article>>());
}
