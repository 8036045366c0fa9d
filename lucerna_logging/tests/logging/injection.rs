//! Tests for build-time logger injection into constructor parameters.
use std::any::type_name;
use std::sync::Arc;

use lucerna::{
    ArgumentList, ComponentDescriptor, ConstructionError, Lifecycle, RegistrationObserver,
    RegistryBuilder, ResolutionContext, ResolveError, Service,
};
use lucerna_logging::{Logger, LoggerError, LoggerFactory, LoggerIntegration, LoggerOf};

use crate::fixtures::{Chronicle, ChronicleBackend, builder_with_backend, builder_without_backend};

#[derive(Debug)]
struct Dispatcher {
    logger: Logger,
}

impl Service for Dispatcher {}

fn register_dispatcher(builder: &mut RegistryBuilder, lifecycle: Lifecycle) {
    builder
        .component::<Dispatcher>()
        .lifecycle(lifecycle)
        .param::<Logger>()
        .constructor(|args| {
            Ok(Dispatcher {
                logger: args.owned::<Logger>()?,
            })
        });
}

#[test]
fn components_receive_a_logger_named_after_themselves() {
    let (mut builder, chronicle) = builder_with_backend();
    register_dispatcher(&mut builder, Lifecycle::Transient);
    let container = builder.build().unwrap().container();

    let dispatcher = container.get::<Dispatcher>().unwrap();

    assert_eq!(dispatcher.logger.category(), type_name::<Dispatcher>());
    // The logger came from the injection hook, not from the root binding.
    assert_eq!(
        chronicle.created_categories(),
        vec![type_name::<Dispatcher>()]
    );
}

#[test]
fn injected_loggers_are_created_per_construction_attempt() {
    let (mut builder, chronicle) = builder_with_backend();
    register_dispatcher(&mut builder, Lifecycle::Transient);
    let container = builder.build().unwrap().container();

    container.get::<Dispatcher>().unwrap();
    container.get::<Dispatcher>().unwrap();

    assert_eq!(chronicle.created_categories().len(), 2);
}

#[test]
fn singleton_construction_runs_the_injection_once() {
    let (mut builder, chronicle) = builder_with_backend();
    register_dispatcher(&mut builder, Lifecycle::Singleton);
    let container = builder.build().unwrap().container();

    container.get::<Dispatcher>().unwrap();
    let child = container.scope();
    child.get::<Dispatcher>().unwrap();

    assert_eq!(chronicle.created_categories().len(), 1);
}

struct Conveyor {
    logger: Logger,
    dispatcher: Arc<Dispatcher>,
}

impl Service for Conveyor {}

#[test]
fn the_category_names_the_component_under_construction() {
    let (mut builder, chronicle) = builder_with_backend();
    register_dispatcher(&mut builder, Lifecycle::Transient);
    builder
        .component::<Conveyor>()
        .param::<Logger>()
        .param::<Dispatcher>()
        .constructor(|args| {
            Ok(Conveyor {
                logger: args.owned::<Logger>()?,
                dispatcher: args.shared::<Dispatcher>()?,
            })
        });
    let container = builder.build().unwrap().container();

    let conveyor = container.get::<Conveyor>().unwrap();

    assert_eq!(conveyor.logger.category(), type_name::<Conveyor>());
    assert_eq!(
        conveyor.dispatcher.logger.category(),
        type_name::<Dispatcher>()
    );
    assert_eq!(
        chronicle.created_categories(),
        vec![type_name::<Conveyor>(), type_name::<Dispatcher>()]
    );
}

struct Auditor {
    logger: LoggerOf<Auditor>,
}

impl Service for Auditor {}

#[test]
fn typed_logger_parameters_resolve_through_the_source() {
    let (mut builder, chronicle) = builder_with_backend();
    builder
        .component::<Auditor>()
        .param::<LoggerOf<Auditor>>()
        .constructor(|args| {
            Ok(Auditor {
                logger: args.owned::<LoggerOf<Auditor>>()?,
            })
        });
    let container = builder.build().unwrap().container();

    let auditor = container.get::<Auditor>().unwrap();
    assert_eq!(auditor.logger.category(), type_name::<Auditor>());

    // The parameter went through the scoped binding: a direct request from
    // the same scope shares it instead of creating a second logger.
    let direct = container.get::<LoggerOf<Auditor>>().unwrap();
    assert_eq!(direct.category(), auditor.logger.category());
    assert_eq!(chronicle.created_categories().len(), 1);
}

struct Freight;

impl Service for Freight {}

#[test]
fn factory_registrations_are_not_hooked() {
    let (mut builder, chronicle) = builder_with_backend();
    builder
        .component::<Freight>()
        .factory(|_cx: &mut ResolutionContext<'_>| Ok(Freight));
    let container = builder.build().unwrap().container();

    container.get::<Freight>().unwrap();

    assert!(chronicle.created_categories().is_empty());
}

struct Stamper {
    logger: Logger,
}

impl Service for Stamper {}

#[test]
fn logger_providing_components_do_not_receive_injected_loggers() {
    let (mut builder, chronicle) = builder_with_backend();
    builder
        .component::<Stamper>()
        .param::<Logger>()
        .expose_as::<LoggerOf<Freight>, _>(|stamper: &Stamper| {
            LoggerOf::new(stamper.logger.clone())
        })
        .constructor(|args| {
            Ok(Stamper {
                logger: args.owned::<Logger>()?,
            })
        });
    let container = builder.build().unwrap().container();

    let stamper = container.get::<Stamper>().unwrap();

    // The injector skipped it: the plain parameter came from the root
    // binding instead of a hook.
    assert_eq!(stamper.logger.category(), "");
    assert_eq!(chronicle.created_categories(), vec![""]);
}

struct Interceptor {
    sink: Arc<Chronicle>,
}

impl RegistrationObserver for Interceptor {
    fn attach(&self, component: &mut ComponentDescriptor) {
        if !component.implementation().is::<Dispatcher>() {
            return;
        }
        let sink = self.sink.clone();
        component.attach_hook(Arc::new(
            move |_cx: &mut ResolutionContext<'_>, arguments: &mut ArgumentList| {
                arguments.append(Logger::new("wiretap", sink.clone()));
                Ok(())
            },
        ));
    }
}

#[test]
fn arguments_from_earlier_observers_shadow_the_injected_logger() {
    let chronicle = Arc::new(Chronicle::default());
    let mut builder = RegistryBuilder::new();
    builder.add_observer(Interceptor {
        sink: chronicle.clone(),
    });
    builder.install(LoggerIntegration::new());
    builder.instance(LoggerFactory::new(Arc::new(ChronicleBackend(
        chronicle.clone(),
    ))));
    register_dispatcher(&mut builder, Lifecycle::Transient);
    let container = builder.build().unwrap().container();

    let dispatcher = container.get::<Dispatcher>().unwrap();

    assert_eq!(dispatcher.logger.category(), "wiretap");
    // The injection hook still ran; its logger simply went unused.
    assert_eq!(
        chronicle.created_categories(),
        vec![type_name::<Dispatcher>()]
    );
}

#[test]
fn a_missing_backend_fails_injected_construction() {
    let mut builder = builder_without_backend();
    register_dispatcher(&mut builder, Lifecycle::Transient);
    let container = builder.build().unwrap().container();

    let error = container.get::<Dispatcher>().unwrap_err();
    let ResolveError::Construction(ConstructionError::Hook { component, source }) = &error else {
        panic!("expected a hook failure, got: {error}");
    };
    assert!(component.is::<Dispatcher>());
    let Some(LoggerError::MissingBackend { category, .. }) =
        source.downcast_ref::<LoggerError>()
    else {
        panic!("expected a missing backend error");
    };
    assert_eq!(category, type_name::<Dispatcher>());
}
