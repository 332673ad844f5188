use crate::abi::*;
use crate::il::var;

#[test]
fn fastcall_used_registers() {
    assert_eq!(FASTCALL_USED.len(), 3);
    assert!(FASTCALL_USED.contains(&var("eax", 32)));
    assert!(FASTCALL_USED.contains(&var("ecx", 32)));
    assert!(FASTCALL_USED.contains(&var("edx", 32)));
}

#[test]
fn intel_abi_defined_registers() {
    assert_eq!(INTEL_ABI_DEFINED.len(), 3);
    assert!(INTEL_ABI_DEFINED.contains(&var("eax", 32)));
    assert!(INTEL_ABI_DEFINED.contains(&var("ecx", 32)));
    assert!(INTEL_ABI_DEFINED.contains(&var("edx", 32)));
}

#[test]
fn register_bitness_matters() {
    // A 64-bit register of the same name is a different location.
    assert!(!FASTCALL_USED.contains(&var("eax", 64)));
}

#[test]
fn preserved_and_trashed_are_disjoint() {
    for typ in [CallingConventionType::Fastcall, CallingConventionType::Cdecl] {
        let convention = CallingConvention::new(typ);
        for variable in convention.trashed_registers() {
            assert_eq!(convention.is_preserved(variable), Some(false));
            assert_eq!(convention.is_trashed(variable), Some(true));
        }
        for variable in convention.preserved_registers() {
            assert_eq!(convention.is_preserved(variable), Some(true));
        }
        assert_eq!(
            convention.is_trashed(convention.return_register()),
            Some(true)
        );
    }
}

#[test]
fn unknown_convention_register() {
    let convention = CallingConvention::new(CallingConventionType::Fastcall);
    assert_eq!(convention.is_preserved(&var("xmm0", 128)), None);
}
