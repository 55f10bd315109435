//! Object references to resources created by end-to-end tests.

use k8s_openapi::{
    api::core::v1::{ObjectReference, Pod},
    apimachinery::pkg::apis::meta::v1::OwnerReference,
};
use kube::Resource;
use snafu::OptionExt;

use crate::{error, error::Error};

/// Builds a reference to the object `namespace/name` of type `K`.
///
/// Kind and API version come from the static type information of `K`.
///
/// # Errors
///
/// Returns [`Error::ResolveKind`] if the kind or API version of `K` is empty.
pub fn object_reference<K>(namespace: &str, name: &str) -> Result<ObjectReference, Error>
where
    K: Resource<DynamicType = ()> + Default,
{
    if K::kind(&()).is_empty() || K::api_version(&()).is_empty() {
        return error::ResolveKindSnafu { name }.fail();
    }

    let mut object = K::default();
    let meta = object.meta_mut();
    meta.name = Some(name.to_string());
    meta.namespace = Some(namespace.to_string());
    Ok(object.object_ref(&()))
}

/// Builds a reference to the pod `namespace/name`.
///
/// # Errors
///
/// See [`object_reference`].
pub fn pod_reference(namespace: &str, name: &str) -> Result<ObjectReference, Error> {
    object_reference::<Pod>(namespace, name)
}

/// Converts a reference into an owner reference. The referenced object must
/// exist, i.e. the reference has to carry its uid.
///
/// # Errors
///
/// Returns [`Error::MissingReferenceField`] naming the first missing field.
pub fn owner_reference(reference: &ObjectReference) -> Result<OwnerReference, Error> {
    Ok(OwnerReference {
        api_version: reference
            .api_version
            .clone()
            .context(error::MissingReferenceFieldSnafu { field: "apiVersion" })?,
        kind: reference.kind.clone().context(error::MissingReferenceFieldSnafu { field: "kind" })?,
        name: reference.name.clone().context(error::MissingReferenceFieldSnafu { field: "name" })?,
        uid: reference.uid.clone().context(error::MissingReferenceFieldSnafu { field: "uid" })?,
        ..OwnerReference::default()
    })
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use k8s_openapi::{
        NamespaceResourceScope, api::core::v1::ConfigMap,
        apimachinery::pkg::apis::meta::v1::ObjectMeta,
    };

    use super::*;

    /// A resource whose type information carries no kind.
    #[derive(Default)]
    struct Unregistered {
        metadata: ObjectMeta,
    }

    impl Resource for Unregistered {
        type DynamicType = ();
        type Scope = NamespaceResourceScope;

        fn kind((): &()) -> Cow<'_, str> { Cow::Borrowed("") }

        fn group((): &()) -> Cow<'_, str> { Cow::Borrowed("") }

        fn version((): &()) -> Cow<'_, str> { Cow::Borrowed("v1") }

        fn plural((): &()) -> Cow<'_, str> { Cow::Borrowed("unregistered") }

        fn meta(&self) -> &ObjectMeta { &self.metadata }

        fn meta_mut(&mut self) -> &mut ObjectMeta { &mut self.metadata }
    }

    #[test]
    fn test_object_reference_without_kind() {
        let err = object_reference::<Unregistered>("ns", "x").unwrap_err();

        assert!(matches!(err, Error::ResolveKind { ref name } if name == "x"));
        assert!(err.to_string().contains("\"x\""));
    }

    #[test]
    fn test_pod_reference() {
        let reference = pod_reference("ns1", "pod1").unwrap();

        assert_eq!(reference.name.as_deref(), Some("pod1"));
        assert_eq!(reference.namespace.as_deref(), Some("ns1"));
        assert_eq!(reference.kind.as_deref(), Some("Pod"));
        assert_eq!(reference.api_version.as_deref(), Some("v1"));
        assert!(reference.uid.is_none());
        assert!(reference.field_path.is_none());
    }

    #[test]
    fn test_object_reference_for_other_kinds() {
        let reference = object_reference::<ConfigMap>("ns1", "settings").unwrap();

        assert_eq!(reference.kind.as_deref(), Some("ConfigMap"));
        assert_eq!(reference.name.as_deref(), Some("settings"));
    }

    #[test]
    fn test_owner_reference_requires_uid() {
        let reference = pod_reference("ns1", "pod1").unwrap();
        let err = owner_reference(&reference).unwrap_err();

        assert!(matches!(err, Error::MissingReferenceField { field: "uid" }));
    }

    #[test]
    fn test_owner_reference() {
        let reference = ObjectReference {
            uid: Some("8d3c9a4e-0000-4000-8000-000000000001".to_string()),
            ..pod_reference("ns1", "pod1").unwrap()
        };
        let owner = owner_reference(&reference).unwrap();

        assert_eq!(owner.api_version, "v1");
        assert_eq!(owner.kind, "Pod");
        assert_eq!(owner.name, "pod1");
        assert_eq!(owner.uid, "8d3c9a4e-0000-4000-8000-000000000001");
        assert!(owner.controller.is_none());
    }
}
