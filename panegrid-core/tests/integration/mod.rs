mod layout_roundtrip;
