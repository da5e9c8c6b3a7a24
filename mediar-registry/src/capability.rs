//! The capability matcher.
//!
//! Pure structural comparison between what a connector declares and what a
//! consumer requires. Mismatch is a normal boolean outcome, never an
//! error; the `ensure_satisfies` helper exists for callers that want `?`
//! flow over a hard requirement.

use mediar_spec::MediarError;
use mediar_spec::types::{ConnectorSchema, Feature, IoPair, Requirement, UnitSchema};

/// Unit-for-unit compatibility: identical primitive tag, or identical
/// `unitId` literal. Field sets do not enter into it - identity is the
/// contract (one literal, one structure, enforced at load).
fn unit_compatible(offered: &UnitSchema, wanted: &UnitSchema) -> bool {
    match (offered, wanted) {
        (UnitSchema::Payload(a), UnitSchema::Payload(b)) => a == b,
        (UnitSchema::Object(a), UnitSchema::Object(b)) => match (a.id(), b.id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        _ => false,
    }
}

/// Pair compatibility: both sides unit-compatible with identical batch
/// wrapping. Stream wrapping is implied by the transfer method the pairs
/// sit under, so it never needs comparing here.
fn pair_compatible(offered: &IoPair, wanted: &IoPair) -> bool {
    offered.input().is_batch() == wanted.input().is_batch()
        && offered.output().is_batch() == wanted.output().is_batch()
        && unit_compatible(offered.input().unit(), wanted.input().unit())
        && unit_compatible(offered.output().unit(), wanted.output().unit())
}

/// Whether the connector covers everything the requirement declares: the
/// same transformation, and under every transfer method the requirement
/// names, a structurally compatible pair for each one it lists.
pub fn satisfies(connector: &ConnectorSchema, requirement: &Requirement) -> bool {
    let Some(offered) = connector
        .supported_io
        .iter()
        .find(|io| io.transformation == requirement.schema.transformation)
    else {
        return false;
    };

    requirement.schema.io.iter().all(|(&method, wanted_pairs)| {
        let offered_pairs = offered.pairs(method);
        wanted_pairs.iter().all(|wanted| {
            offered_pairs
                .iter()
                .any(|pair| pair_compatible(pair, wanted))
        })
    })
}

/// Whether a set of connectors satisfies a feature: every `required`
/// requirement covered by at least one connector; different requirements
/// may be covered by different connectors.
pub fn feature_satisfied(connectors: &[&ConnectorSchema], feature: &Feature) -> bool {
    feature
        .requirements
        .iter()
        .filter(|requirement| requirement.required)
        .all(|requirement| {
            connectors
                .iter()
                .any(|connector| satisfies(connector, requirement))
        })
}

/// `satisfies` lifted into a `Result` for hard requirements.
pub fn ensure_satisfies(
    connector: &ConnectorSchema,
    requirement: &Requirement,
) -> Result<(), MediarError> {
    if satisfies(connector, requirement) {
        Ok(())
    } else {
        Err(MediarError::CapabilityMismatch(format!(
            "connector '{}' does not cover requirement '{}'",
            connector.id, requirement.id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediar_spec::types::{
        IoUnitSchema, ObjectUnitSchema, OptionsSchema, PayloadKind, TransferMethod,
        Transformation, TransformationIo,
    };

    fn chat_unit() -> ObjectUnitSchema {
        ObjectUnitSchema::new("chatMessage", PayloadKind::String)
    }

    fn connector() -> ConnectorSchema {
        ConnectorSchema::new("acme", OptionsSchema::new(["acme-1"])).with_io(
            TransformationIo::new(Transformation::TextToText)
                .with(
                    TransferMethod::StaticInStaticOut,
                    vec![IoPair::new(PayloadKind::String, PayloadKind::String)],
                )
                .with(
                    TransferMethod::StaticInStreamOut,
                    vec![IoPair::new(
                        IoUnitSchema::batch(chat_unit()),
                        PayloadKind::String,
                    )],
                ),
        )
    }

    fn requirement(io: TransformationIo) -> Requirement {
        Requirement::new("req", "test requirement", io).required()
    }

    #[test]
    fn identical_shape_is_satisfied() {
        let req = requirement(TransformationIo::new(Transformation::TextToText).with(
            TransferMethod::StaticInStaticOut,
            vec![IoPair::new(PayloadKind::String, PayloadKind::String)],
        ));
        assert!(satisfies(&connector(), &req));
        assert!(ensure_satisfies(&connector(), &req).is_ok());
    }

    #[test]
    fn batch_wrapping_must_match_exactly() {
        // string -> string is offered; [string] -> string is not.
        let req = requirement(TransformationIo::new(Transformation::TextToText).with(
            TransferMethod::StaticInStaticOut,
            vec![IoPair::new(
                IoUnitSchema::batch(PayloadKind::String),
                PayloadKind::String,
            )],
        ));
        assert!(!satisfies(&connector(), &req));
    }

    #[test]
    fn transfer_method_must_match() {
        let req = requirement(TransformationIo::new(Transformation::TextToText).with(
            TransferMethod::StreamInStreamOut,
            vec![IoPair::new(PayloadKind::String, PayloadKind::String)],
        ));
        assert!(!satisfies(&connector(), &req));
    }

    #[test]
    fn transformation_must_match() {
        let req = requirement(TransformationIo::new(Transformation::TextToImage).with(
            TransferMethod::StaticInStaticOut,
            vec![IoPair::new(PayloadKind::String, PayloadKind::String)],
        ));
        assert!(!satisfies(&connector(), &req));
    }

    #[test]
    fn object_units_match_by_identity() {
        let req = requirement(TransformationIo::new(Transformation::TextToText).with(
            TransferMethod::StaticInStreamOut,
            vec![IoPair::new(
                IoUnitSchema::batch(chat_unit()),
                PayloadKind::String,
            )],
        ));
        assert!(satisfies(&connector(), &req));

        let other = requirement(TransformationIo::new(Transformation::TextToText).with(
            TransferMethod::StaticInStreamOut,
            vec![IoPair::new(
                IoUnitSchema::batch(ObjectUnitSchema::new("orderLine", PayloadKind::String)),
                PayloadKind::String,
            )],
        ));
        assert!(!satisfies(&connector(), &other));
    }

    #[test]
    fn mismatch_is_an_error_only_through_ensure() {
        let req = requirement(TransformationIo::new(Transformation::VideoToText).with(
            TransferMethod::StaticInStaticOut,
            vec![IoPair::new(PayloadKind::Binary, PayloadKind::String)],
        ));
        assert!(!satisfies(&connector(), &req));
        assert!(matches!(
            ensure_satisfies(&connector(), &req),
            Err(MediarError::CapabilityMismatch(_))
        ));
    }

    #[test]
    fn feature_requires_all_required_requirements() {
        let chat = requirement(TransformationIo::new(Transformation::TextToText).with(
            TransferMethod::StaticInStaticOut,
            vec![IoPair::new(PayloadKind::String, PayloadKind::String)],
        ));
        let vision = requirement(TransformationIo::new(Transformation::ImageToText).with(
            TransferMethod::StaticInStaticOut,
            vec![IoPair::new(PayloadKind::Binary, PayloadKind::String)],
        ));
        let optional_audio = Requirement::new(
            "audio",
            "nice to have",
            TransformationIo::new(Transformation::TextToAudio).with(
                TransferMethod::StaticInStaticOut,
                vec![IoPair::new(PayloadKind::String, PayloadKind::Binary)],
            ),
        );

        let vision_connector = ConnectorSchema::new("eyes", OptionsSchema::new(["eyes-1"]))
            .with_io(TransformationIo::new(Transformation::ImageToText).with(
                TransferMethod::StaticInStaticOut,
                vec![IoPair::new(PayloadKind::Binary, PayloadKind::String)],
            ));

        let feature = Feature::new("assistant", "chat plus vision")
            .with_requirement(chat)
            .with_requirement(vision)
            .with_requirement(optional_audio);

        let chat_connector = connector();
        // Chat alone misses the vision requirement.
        assert!(!feature_satisfied(&[&chat_connector], &feature));
        // Two connectors cover the required set; the optional audio
        // requirement does not block satisfaction.
        assert!(feature_satisfied(
            &[&chat_connector, &vision_connector],
            &feature
        ));
    }
}
